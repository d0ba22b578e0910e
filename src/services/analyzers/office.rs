// src/services/analyzers/office.rs
//
// Tenant-roster analysis for office assets: WALT, weighted credit quality,
// and rent concentration. Tenants missing a field drop out of the averages
// that need it.
use chrono::NaiveDate;

use super::herfindahl;
use crate::models::{OfficeAnalysis, OfficeTenant};

const DAYS_PER_YEAR: f64 = 365.25;

/// S&P-style letter rating to a 1-10 numeric score. Unrated tenants score
/// nothing and are excluded from the weighted average.
fn credit_score(rating: &str) -> Option<f64> {
    let normalized = rating.trim().to_ascii_uppercase();
    let score = match normalized.as_str() {
        "AAA" => 10.0,
        "AA+" | "AA" | "AA-" => 9.0,
        "A+" | "A" | "A-" => 8.0,
        "BBB+" | "BBB" | "BBB-" => 6.5,
        "BB+" | "BB" | "BB-" => 5.0,
        "B+" | "B" | "B-" => 4.0,
        "CCC+" | "CCC" | "CCC-" => 2.5,
        "CC" => 2.0,
        "C" => 1.5,
        "D" => 1.0,
        _ => return None,
    };
    Some(score)
}

fn credit_profile(score: f64) -> &'static str {
    if score >= 8.5 {
        "investment grade"
    } else if score >= 6.5 {
        "strong credit"
    } else if score >= 5.0 {
        "moderate credit"
    } else {
        "credit watch"
    }
}

fn remaining_years(lease_end: NaiveDate, as_of: NaiveDate) -> f64 {
    ((lease_end - as_of).num_days() as f64 / DAYS_PER_YEAR).max(0.0)
}

pub fn analyze(tenants: &[OfficeTenant], as_of: NaiveDate) -> OfficeAnalysis {
    let mut analysis = OfficeAnalysis {
        tenant_count: tenants.len(),
        ..Default::default()
    };

    // WALT: rent-weighted average remaining lease term.
    let mut term_weight = 0.0;
    let mut term_sum = 0.0;
    let mut rolling_rent = 0.0;
    for tenant in tenants {
        let (Some(rent), Some(lease_end)) = (tenant.annual_rent, tenant.lease_end) else {
            continue;
        };
        if rent <= 0.0 {
            continue;
        }
        let remaining = remaining_years(lease_end, as_of);
        term_weight += rent;
        term_sum += rent * remaining;
        if remaining <= 2.0 {
            rolling_rent += rent;
        }
    }
    if term_weight > 0.0 {
        analysis.walt_years = Some(term_sum / term_weight);
        analysis.rollover_within_24_months_pct = Some(rolling_rent / term_weight * 100.0);
    }

    // Weighted credit score; tenants without a rent figure carry unit weight
    // so a roster rated but not priced still gets a profile.
    let mut credit_weight = 0.0;
    let mut credit_sum = 0.0;
    for tenant in tenants {
        let Some(score) = tenant.credit_rating.as_deref().and_then(credit_score) else {
            continue;
        };
        let weight = tenant.annual_rent.filter(|r| *r > 0.0).unwrap_or(1.0);
        credit_weight += weight;
        credit_sum += weight * score;
    }
    if credit_weight > 0.0 {
        let score = credit_sum / credit_weight;
        analysis.weighted_credit_score = Some(score);
        analysis.credit_profile = Some(credit_profile(score).to_string());
    }

    // Rent concentration.
    let rents: Vec<f64> = tenants
        .iter()
        .filter_map(|t| t.annual_rent.filter(|r| *r > 0.0))
        .collect();
    if let Some(hhi) = herfindahl(&rents) {
        analysis.tenant_concentration = Some(hhi);
        let total: f64 = rents.iter().sum();
        let largest = rents.iter().cloned().fold(0.0, f64::max);
        analysis.largest_tenant_share_pct = Some(largest / total * 100.0);
    }

    if let Some(walt) = analysis.walt_years {
        if walt < 3.0 {
            analysis
                .findings
                .push(format!("WALT of {:.1} years leaves near-term rollover exposure", walt));
        }
    }
    if let Some(rollover) = analysis.rollover_within_24_months_pct {
        if rollover > 40.0 {
            analysis.findings.push(format!(
                "{:.0}% of rent rolls within 24 months",
                rollover
            ));
        }
    }
    if let Some(hhi) = analysis.tenant_concentration {
        if hhi > 0.3 {
            analysis
                .findings
                .push("Rent roll is concentrated in few tenants".to_string());
        }
    }
    if let Some(score) = analysis.weighted_credit_score {
        if score < 5.0 {
            analysis
                .findings
                .push("Weighted tenant credit is below investment quality".to_string());
        }
    }

    analysis
}
