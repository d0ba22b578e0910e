// src/services/analyzers/retail.rs
//
// Sales and co-tenancy analysis for retail assets. Occupancy cost (rent over
// sales) is the health measure; anchors and category mix drive the co-tenancy
// read.
use super::herfindahl;
use crate::models::{RetailAnalysis, RetailTenant};

// Rent above this share of sales typically signals tenant stress.
const OCCUPANCY_COST_WATCH_PCT: f64 = 15.0;

pub fn analyze(tenants: &[RetailTenant]) -> RetailAnalysis {
    let mut analysis = RetailAnalysis {
        tenant_count: tenants.len(),
        ..Default::default()
    };

    // Sales per square foot across tenants reporting both.
    let mut sales_total = 0.0;
    let mut sales_sq_ft = 0.0;
    for tenant in tenants {
        let (Some(sales), Some(sq_ft)) = (tenant.annual_sales, tenant.leased_sq_ft) else {
            continue;
        };
        if sales > 0.0 && sq_ft > 0.0 {
            sales_total += sales;
            sales_sq_ft += sq_ft;
        }
    }
    if sales_sq_ft > 0.0 {
        analysis.avg_sales_per_sq_ft = Some(sales_total / sales_sq_ft);
    }

    // Occupancy cost: total rent over total sales for tenants reporting both.
    let mut rent_total = 0.0;
    let mut rent_sales = 0.0;
    for tenant in tenants {
        let (Some(rent), Some(sales)) = (tenant.annual_rent, tenant.annual_sales) else {
            continue;
        };
        if rent > 0.0 && sales > 0.0 {
            rent_total += rent;
            rent_sales += sales;
        }
    }
    if rent_sales > 0.0 {
        analysis.avg_occupancy_cost_pct = Some(rent_total / rent_sales * 100.0);
    }

    // Anchor share of leased area.
    let total_sq_ft: f64 = tenants
        .iter()
        .filter_map(|t| t.leased_sq_ft.filter(|s| *s > 0.0))
        .sum();
    if total_sq_ft > 0.0 {
        let anchor_sq_ft: f64 = tenants
            .iter()
            .filter(|t| t.anchor)
            .filter_map(|t| t.leased_sq_ft.filter(|s| *s > 0.0))
            .sum();
        analysis.anchor_share_pct = Some(anchor_sq_ft / total_sq_ft * 100.0);
    }

    // Category concentration over rent.
    let mut category_rents: std::collections::BTreeMap<String, f64> = Default::default();
    for tenant in tenants {
        let (Some(category), Some(rent)) = (tenant.category.as_deref(), tenant.annual_rent) else {
            continue;
        };
        if rent > 0.0 {
            *category_rents
                .entry(category.trim().to_ascii_lowercase())
                .or_insert(0.0) += rent;
        }
    }
    let category_weights: Vec<f64> = category_rents.values().copied().collect();
    analysis.category_concentration = herfindahl(&category_weights);

    let has_anchor = tenants.iter().any(|t| t.anchor);
    let concentrated = analysis.category_concentration.map_or(false, |hhi| hhi > 0.5);
    analysis.co_tenancy_risk = Some(
        match (has_anchor, concentrated) {
            (true, false) => "low",
            (true, true) => "moderate",
            (false, false) => "moderate",
            (false, true) => "elevated",
        }
        .to_string(),
    );

    if let Some(cost) = analysis.avg_occupancy_cost_pct {
        if cost > OCCUPANCY_COST_WATCH_PCT {
            analysis.findings.push(format!(
                "Occupancy cost of {:.1}% of sales is above the {:.0}% watch level",
                cost, OCCUPANCY_COST_WATCH_PCT
            ));
        }
    }
    if !has_anchor {
        analysis
            .findings
            .push("No anchor tenant in the rent roll".to_string());
    }
    if concentrated {
        analysis
            .findings
            .push("Rent is concentrated in a single retail category".to_string());
    }

    analysis
}
