// src/services/analyzers/mod.rs
//
// Asset-type sub-reports. Each analyzer is independent and heuristic: it
// reads the optional nested records for its property type and produces a
// descriptive, scored summary. A missing roster means "nothing to analyze",
// so dispatch returns None rather than an error.
use chrono::NaiveDate;

use crate::models::{AssetAnalysis, PropertyData, PropertyType};

pub mod industrial;
pub mod mixed_use;
pub mod multifamily;
pub mod office;
pub mod retail;

/// Herfindahl index over a weight vector: sum of squared fractional shares,
/// 0-1 where 1 is a single dominant entry. `None` when the weights sum to
/// nothing.
pub(crate) fn herfindahl(weights: &[f64]) -> Option<f64> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    Some(
        weights
            .iter()
            .filter(|w| **w > 0.0)
            .map(|w| (w / total).powi(2))
            .sum(),
    )
}

pub fn run(
    property_type: PropertyType,
    data: &PropertyData,
    as_of: NaiveDate,
) -> Option<AssetAnalysis> {
    match property_type {
        PropertyType::Office => data
            .office_tenants
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| AssetAnalysis::Office(office::analyze(t, as_of))),
        PropertyType::Retail => data
            .retail_tenants
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| AssetAnalysis::Retail(retail::analyze(t))),
        PropertyType::Industrial => {
            industrial::analyze(data).map(AssetAnalysis::Industrial)
        }
        PropertyType::Multifamily => data
            .unit_mix
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|m| AssetAnalysis::Multifamily(multifamily::analyze(m, data.market_avg_rent))),
        PropertyType::MixedUse => data
            .components
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| AssetAnalysis::MixedUse(mixed_use::analyze(c))),
    }
}
