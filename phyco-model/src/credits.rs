//! Commodity valuation of dry algae biomass.

use serde::Serialize;

/// Carbon share of dry biomass, by weight.
pub const C_PCT: f64 = 0.33;
/// Nitrogen share of dry biomass, by weight.
pub const N_PCT: f64 = 0.025;
/// Phosphorus share of dry biomass, by weight.
pub const P_PCT: f64 = 0.003;

/// Carbon price, USD per lb.
pub const PRICE_C: f64 = 0.13;
/// Nitrogen price, USD per lb.
pub const PRICE_N: f64 = 5.08;
/// Phosphorus price, USD per lb.
pub const PRICE_P: f64 = 11.15;

/// Nutrient content of a harvest and what it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhycoCredits {
    pub carbon_lb: f64,
    pub nitrogen_lb: f64,
    pub phosphorus_lb: f64,
    pub value_c_usd: f64,
    pub value_n_usd: f64,
    pub value_p_usd: f64,
    pub total_usd: f64,
}

/// Decompose dry biomass into carbon, nitrogen and phosphorus and price each.
pub fn calculate_phyco_credits(dry_biomass_lb: f64) -> PhycoCredits {
    let carbon_lb = dry_biomass_lb * C_PCT;
    let nitrogen_lb = dry_biomass_lb * N_PCT;
    let phosphorus_lb = dry_biomass_lb * P_PCT;

    let value_c_usd = carbon_lb * PRICE_C;
    let value_n_usd = nitrogen_lb * PRICE_N;
    let value_p_usd = phosphorus_lb * PRICE_P;

    PhycoCredits {
        carbon_lb,
        nitrogen_lb,
        phosphorus_lb,
        value_c_usd,
        value_n_usd,
        value_p_usd,
        total_usd: value_c_usd + value_n_usd + value_p_usd,
    }
}
