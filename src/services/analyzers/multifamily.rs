// src/services/analyzers/multifamily.rs
//
// Unit-mix and market-positioning analysis for multifamily assets. Averages
// are unit-count weighted; positioning compares in-place rent to the stated
// market average.
use super::herfindahl;
use crate::models::{MultifamilyAnalysis, UnitMixEntry};

// In-place rent more than this far from market earns a positioning label.
const POSITIONING_BAND_PCT: f64 = 10.0;

fn positioning(premium_pct: f64) -> &'static str {
    if premium_pct > POSITIONING_BAND_PCT {
        "premium"
    } else if premium_pct < -POSITIONING_BAND_PCT {
        "below market"
    } else {
        "market rate"
    }
}

pub fn analyze(unit_mix: &[UnitMixEntry], market_avg_rent: Option<f64>) -> MultifamilyAnalysis {
    let mut analysis = MultifamilyAnalysis::default();

    let total_units: u32 = unit_mix.iter().map(|e| e.count).sum();
    analysis.total_units = total_units;
    if total_units == 0 {
        return analysis;
    }

    // Count-weighted average rent over entries reporting one.
    let mut rent_units = 0u32;
    let mut rent_sum = 0.0;
    for entry in unit_mix {
        if let Some(rent) = entry.avg_monthly_rent.filter(|r| *r > 0.0) {
            rent_units += entry.count;
            rent_sum += rent * entry.count as f64;
        }
    }
    if rent_units > 0 {
        let avg_rent = rent_sum / rent_units as f64;
        analysis.avg_monthly_rent = Some(avg_rent);
        analysis.revenue_per_unit_year = Some(avg_rent * 12.0);

        if let Some(market) = market_avg_rent.filter(|m| *m > 0.0) {
            let premium = (avg_rent / market - 1.0) * 100.0;
            analysis.market_premium_pct = Some(premium);
            analysis.positioning = Some(positioning(premium).to_string());
        }
    }

    // Rent per SF over entries reporting both rent and area.
    let mut sf_units = 0.0;
    let mut sf_rent = 0.0;
    for entry in unit_mix {
        let (Some(rent), Some(sq_ft)) = (entry.avg_monthly_rent, entry.avg_sq_ft) else {
            continue;
        };
        if rent > 0.0 && sq_ft > 0.0 {
            sf_rent += rent * entry.count as f64;
            sf_units += sq_ft * entry.count as f64;
        }
    }
    if sf_units > 0.0 {
        analysis.avg_rent_per_sq_ft = Some(sf_rent / sf_units);
    }

    let counts: Vec<f64> = unit_mix.iter().map(|e| e.count as f64).collect();
    analysis.unit_mix_diversity = herfindahl(&counts).map(|hhi| 1.0 - hhi);

    if let Some(premium) = analysis.market_premium_pct {
        if premium < -POSITIONING_BAND_PCT {
            analysis.findings.push(format!(
                "In-place rents run {:.0}% below market; mark-to-market upside on turnover",
                -premium
            ));
        } else if premium > 2.0 * POSITIONING_BAND_PCT {
            analysis.findings.push(format!(
                "In-place rents run {:.0}% above market; premium may not hold on renewal",
                premium
            ));
        }
    }
    if let Some(diversity) = analysis.unit_mix_diversity {
        if diversity < 0.2 && unit_mix.len() > 1 {
            analysis
                .findings
                .push("Unit mix is dominated by a single floor plan".to_string());
        }
    }

    analysis
}
