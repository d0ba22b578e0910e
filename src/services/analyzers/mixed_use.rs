// src/services/analyzers/mixed_use.rs
//
// Component analysis for mixed-use assets: income/area shares, a
// diversification score, synergy and conflict reads from use-pair tables,
// and a rough conversion option value for the weakest component.
use std::collections::BTreeMap;

use super::herfindahl;
use crate::models::{ComponentShare, MixedUseAnalysis, MixedUseComponent, PropertyType};

// Perpetuity-NPV approximation constants for the conversion option.
const CONVERSION_PROBABILITY: f64 = 0.35;
const CONVERSION_DISCOUNT_RATE: f64 = 0.08;

/// How well two uses feed each other's demand, 0-1.
fn synergy_weight(a: PropertyType, b: PropertyType) -> f64 {
    use PropertyType::*;
    match (a.min(b), a.max(b)) {
        (Office, Retail) => 0.8,
        (Retail, Multifamily) => 1.0,
        (Office, Multifamily) => 0.6,
        _ => 0.0,
    }
}

/// How badly two uses interfere with each other, 0-1.
fn conflict_weight(a: PropertyType, b: PropertyType) -> f64 {
    use PropertyType::*;
    match (a.min(b), a.max(b)) {
        (Industrial, Multifamily) => 1.0,
        (Office, Industrial) => 0.5,
        (Retail, Industrial) => 0.4,
        _ => 0.0,
    }
}

pub fn analyze(components: &[MixedUseComponent]) -> MixedUseAnalysis {
    let mut analysis = MixedUseAnalysis::default();

    // Aggregate income and area per use; the same use entered twice is one
    // component for scoring purposes.
    let mut income_by_use: BTreeMap<PropertyType, f64> = BTreeMap::new();
    let mut sq_ft_by_use: BTreeMap<PropertyType, f64> = BTreeMap::new();
    for component in components {
        if let Some(income) = component.annual_income.filter(|i| *i > 0.0) {
            *income_by_use.entry(component.use_type).or_insert(0.0) += income;
        }
        if let Some(sq_ft) = component.sq_ft.filter(|s| *s > 0.0) {
            *sq_ft_by_use.entry(component.use_type).or_insert(0.0) += sq_ft;
        }
    }

    let total_income: f64 = income_by_use.values().sum();
    let total_sq_ft: f64 = sq_ft_by_use.values().sum();

    let uses: Vec<PropertyType> = components
        .iter()
        .map(|c| c.use_type)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    for use_type in &uses {
        analysis.components.push(ComponentShare {
            use_type: *use_type,
            income_share_pct: income_by_use
                .get(use_type)
                .filter(|_| total_income > 0.0)
                .map(|i| i / total_income * 100.0),
            sq_ft_share_pct: sq_ft_by_use
                .get(use_type)
                .filter(|_| total_sq_ft > 0.0)
                .map(|s| s / total_sq_ft * 100.0),
        });
    }

    // Dominant use by income, falling back to area.
    analysis.dominant_use = income_by_use
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(use_type, _)| *use_type)
        .or_else(|| {
            sq_ft_by_use
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(use_type, _)| *use_type)
        });

    let income_weights: Vec<f64> = income_by_use.values().copied().collect();
    analysis.diversification_score = herfindahl(&income_weights).map(|hhi| 1.0 - hhi);

    // Pairwise synergy/conflict weighted by the product of income shares, so
    // a token component cannot dominate the read. Scaled to 0-100.
    if total_income > 0.0 && income_by_use.len() > 1 {
        let shares: Vec<(PropertyType, f64)> = income_by_use
            .iter()
            .map(|(u, i)| (*u, i / total_income))
            .collect();
        let mut synergy = 0.0;
        let mut conflict = 0.0;
        for (i, (use_a, share_a)) in shares.iter().enumerate() {
            for (use_b, share_b) in shares.iter().skip(i + 1) {
                synergy += synergy_weight(*use_a, *use_b) * 2.0 * share_a * share_b;
                conflict += conflict_weight(*use_a, *use_b) * 2.0 * share_a * share_b;
            }
        }
        analysis.synergy_score = (synergy * 100.0).min(100.0);
        analysis.conflict_score = (conflict * 100.0).min(100.0);
    }

    // Conversion option: upgrading the weakest component's income density to
    // the strongest's, probability-weighted and capitalized as a perpetuity.
    let densities: Vec<(PropertyType, f64, f64)> = uses
        .iter()
        .filter_map(|u| {
            let income = income_by_use.get(u)?;
            let sq_ft = sq_ft_by_use.get(u)?;
            Some((*u, income / sq_ft, *sq_ft))
        })
        .collect();
    if densities.len() > 1 {
        let best = densities
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        let worst = densities
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        let uplift = (best.1 - worst.1) * worst.2;
        if uplift > 0.0 {
            analysis.conversion_option_value =
                Some(CONVERSION_PROBABILITY * uplift / CONVERSION_DISCOUNT_RATE);
        }
    }

    if analysis.conflict_score > 10.0 {
        analysis
            .findings
            .push("Component uses conflict; shared access and hours need management".to_string());
    }
    if analysis.synergy_score > 30.0 {
        analysis
            .findings
            .push("Component uses are complementary and support cross-traffic".to_string());
    }
    if let Some(diversification) = analysis.diversification_score {
        if diversification < 0.2 {
            analysis
                .findings
                .push("Income is effectively single-use despite the mixed-use label".to_string());
        }
    }

    analysis
}
