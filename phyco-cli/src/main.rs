//! phyco - reshape algae monitoring data and serve biomass feasibility predictions.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "phyco",
    version,
    about = "Algae monitoring data tools and biomass feasibility service"
)]
struct Cli {
    #[command(subcommand)]
    command: phyco_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("phyco {}", env!("CARGO_PKG_VERSION"));
    phyco_cmd::run(cli.command).await
}
