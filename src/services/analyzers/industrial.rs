// src/services/analyzers/industrial.rs
//
// Building functionality scoring for industrial assets. Each physical
// attribute maps to a 0-100 factor score; the weighted blend classifies the
// building. Returns None only when no industrial attribute was provided at
// all.
use crate::models::{FunctionalityFactors, IndustrialAnalysis, PropertyData};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalityWeights {
    pub clear_height: f64,
    pub loading: f64,
    pub office_buildout: f64,
    pub truck_court: f64,
}

impl Default for FunctionalityWeights {
    fn default() -> Self {
        FunctionalityWeights {
            clear_height: 0.35,
            loading: 0.30,
            office_buildout: 0.15,
            truck_court: 0.20,
        }
    }
}

fn clear_height_score(feet: f64) -> f64 {
    if feet >= 36.0 {
        100.0
    } else if feet >= 32.0 {
        90.0
    } else if feet >= 28.0 {
        75.0
    } else if feet >= 24.0 {
        55.0
    } else {
        35.0
    }
}

/// Dock doors per 10k SF; one per 10k SF scores full marks.
fn loading_score(dock_doors: u32, square_footage: Option<f64>) -> Option<f64> {
    let sq_ft = square_footage.filter(|s| *s > 0.0)?;
    let doors_per_10k = dock_doors as f64 / (sq_ft / 10_000.0);
    Some((doors_per_10k * 100.0).min(100.0))
}

/// Modern bulk product carries 5-15% office; heavy build-out hurts re-use.
fn office_buildout_score(pct: f64) -> f64 {
    if (5.0..=15.0).contains(&pct) {
        100.0
    } else if pct < 5.0 {
        80.0
    } else if pct <= 25.0 {
        60.0
    } else {
        30.0
    }
}

fn truck_court_score(feet: f64) -> f64 {
    if feet >= 130.0 {
        100.0
    } else if feet >= 110.0 {
        75.0
    } else {
        50.0
    }
}

fn spec_class(score: f64) -> &'static str {
    if score >= 85.0 {
        "modern distribution"
    } else if score >= 65.0 {
        "functional"
    } else {
        "legacy"
    }
}

pub fn analyze(data: &PropertyData) -> Option<IndustrialAnalysis> {
    analyze_weighted(data, &FunctionalityWeights::default())
}

pub fn analyze_weighted(
    data: &PropertyData,
    weights: &FunctionalityWeights,
) -> Option<IndustrialAnalysis> {
    let clear_height = data.clear_height_ft.map(clear_height_score);
    let loading = data
        .dock_doors
        .and_then(|doors| loading_score(doors, data.square_footage));
    let office = data.office_buildout_pct.map(office_buildout_score);
    let truck_court = data.truck_court_depth_ft.map(truck_court_score);

    if clear_height.is_none() && loading.is_none() && office.is_none() && truck_court.is_none() {
        return None;
    }

    // Weighted blend over whichever factors were provided, renormalized so a
    // partially-described building is not penalized for missing fields.
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (score, weight) in [
        (clear_height, weights.clear_height),
        (loading, weights.loading),
        (office, weights.office_buildout),
        (truck_court, weights.truck_court),
    ] {
        if let Some(s) = score {
            weighted_sum += s * weight;
            weight_sum += weight;
        }
    }
    let functionality_score = weighted_sum / weight_sum;

    let mut findings = Vec::new();
    if let Some(feet) = data.clear_height_ft {
        if feet < 24.0 {
            findings.push(format!(
                "Clear height of {:.0} ft is below the 24 ft modern-logistics floor",
                feet
            ));
        }
    }
    if let (Some(doors), Some(sq_ft)) = (data.dock_doors, data.square_footage) {
        if sq_ft > 0.0 && (doors as f64) / (sq_ft / 10_000.0) < 0.5 {
            findings.push("Dock door count is light for the building area".to_string());
        }
    }
    if let Some(pct) = data.office_buildout_pct {
        if pct > 25.0 {
            findings.push(format!(
                "Office build-out of {:.0}% limits warehouse re-use",
                pct
            ));
        }
    }

    Some(IndustrialAnalysis {
        functionality_score,
        spec_class: spec_class(functionality_score).to_string(),
        factors: FunctionalityFactors {
            clear_height: clear_height.unwrap_or(0.0),
            loading: loading.unwrap_or(0.0),
            office_buildout: office.unwrap_or(0.0),
            truck_court: truck_court.unwrap_or(0.0),
        },
        findings,
    })
}
