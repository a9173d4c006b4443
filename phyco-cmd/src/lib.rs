//! Command implementations for the phyco CLI.
//!
//! Provides subcommands for reshaping algae monitoring exports, cleaning
//! instrument CSVs, and serving the feasibility model over HTTP.

use clap::Subcommand;
use phyco_data::pivot::Aggregation;
use std::net::IpAddr;
use std::path::PathBuf;

pub mod algae;
pub mod clean;
pub mod serve;

#[derive(Subcommand)]
pub enum Command {
    /// Reshape a long-format algae monitoring export into feature tables
    CleanAlgae {
        /// Long-format monitoring CSV (may be gzipped)
        #[arg(short, long, default_value = "ML/data/algae_alberta.csv")]
        input: PathBuf,

        /// Output path for rows with a chlorophyll measurement
        #[arg(short, long, default_value = "ML/data/cleaned_algae_data.csv")]
        output: PathBuf,

        /// Output path for rows with every characteristic present
        #[arg(
            short = 'c',
            long,
            default_value = "ML/data/cleaned_algae_data_complete.csv"
        )]
        complete_output: PathBuf,

        /// How to combine repeated readings at one station and date: first, last or mean
        #[arg(short, long, default_value_t = Aggregation::First)]
        aggregate: Aggregation,
    },

    /// Drop the units row and incomplete records from an instrument CSV
    CleanCsv {
        /// CSV with a units row under the header (may be gzipped)
        #[arg(
            short,
            long,
            default_value = "nafc_station_27_ctd_profiles_f672_c5bd_0a38.csv"
        )]
        input: PathBuf,

        /// Output path for the cleaned CSV
        #[arg(short, long, default_value = "cleaned_output.csv")]
        output: PathBuf,
    },

    /// Serve biomass feasibility predictions over HTTP
    Serve {
        /// Path to the exported quantile model artifact
        #[arg(
            short,
            long,
            env = "PHYCO_MODEL_PATH",
            default_value = "quantile_regressor_model.json"
        )]
        model: PathBuf,

        /// Address to bind
        #[arg(long, env = "PHYCO_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "PHYCO_PORT", default_value_t = 9000)]
        port: u16,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::CleanAlgae {
            input,
            output,
            complete_output,
            aggregate,
        } => algae::run_clean_algae(&input, &output, &complete_output, aggregate),
        Command::CleanCsv { input, output } => clean::run_clean_csv(&input, &output),
        Command::Serve { model, host, port } => serve::run_serve(&model, host, port).await,
    }
}
