// src/services/calculator.rs
//
// The single-pass orchestrator: resolve the package, validate the record,
// derive the metric flags, compute each flagged metric, then sanity-check
// the results. Every anticipated failure rides inside the returned
// AnalysisResult; one unavailable metric never aborts the batch.
use chrono::Utc;
use log::{info, warn};

use crate::models::{
    AnalysisResult, CalculatedMetrics, Metric, MetricFlags, PropertyData,
};
use crate::services::{analyzers, metrics, packages, sanity, validation};

/// Why a metric came back empty, phrased for the report.
fn absence_reason(metric: Metric) -> &'static str {
    match metric {
        Metric::CapRate => "requires purchase price and current NOI",
        Metric::CashOnCash => "requires annual cash flow and a derivable total investment",
        Metric::Dscr => {
            "requires current NOI and a non-zero debt service from loan amount, rate and term"
        }
        Metric::Ltv => "requires loan amount and purchase price",
        Metric::Grm => "requires purchase price and gross annual income",
        Metric::PricePerSquareFoot => "requires purchase price and square footage",
        Metric::PricePerUnit => "requires purchase price and unit count",
        Metric::OperatingExpenseRatio => "requires operating expenses and gross annual income",
        Metric::BreakEvenOccupancy => "requires operating expenses and gross annual income",
        Metric::EquityMultiple => {
            "requires cash flow, equity, hold period and exit cap rate projection inputs"
        }
        Metric::Irr => {
            "requires a hold-period projection with both invested and returned cash"
        }
        Metric::AssetAnalysis => "requires the property-type detail records",
    }
}

pub fn run_analysis(
    package_id: &str,
    data: &PropertyData,
    thresholds: &sanity::SanityThresholds,
) -> AnalysisResult {
    let Some(package) = packages::find(package_id) else {
        warn!("Analysis requested for unknown package '{}'", package_id);
        return AnalysisResult::failure(package_id, format!("Package '{}' not found", package_id));
    };

    let mut validation_errors = validation::check_required_fields(package, data);
    validation_errors.extend(validation::check_field_values(data));
    if !validation_errors.is_empty() {
        info!(
            "Validation failed for package '{}': {} field error(s)",
            package_id,
            validation_errors.len()
        );
        return AnalysisResult {
            success: false,
            package_id: package_id.to_string(),
            property_type: Some(package.property_type),
            metrics: None,
            validation_errors,
            warnings: Vec::new(),
            errors: Vec::new(),
            error: Some("Required property data is missing or invalid".to_string()),
        };
    }

    let flags = MetricFlags::from_metrics(package.included_metrics);
    let as_of = data.analysis_date.unwrap_or_else(|| Utc::now().date_naive());

    let mut computed = CalculatedMetrics::default();
    for metric in flags.iter() {
        let value = match metric {
            Metric::CapRate => metrics::cap_rate(data),
            Metric::CashOnCash => metrics::cash_on_cash(data),
            Metric::Dscr => metrics::dscr(data),
            Metric::Ltv => metrics::ltv(data),
            Metric::Grm => metrics::grm(data),
            Metric::PricePerSquareFoot => metrics::price_per_square_foot(data),
            Metric::PricePerUnit => metrics::price_per_unit(data),
            Metric::OperatingExpenseRatio => metrics::operating_expense_ratio(data),
            Metric::BreakEvenOccupancy => metrics::break_even_occupancy(data),
            Metric::EquityMultiple => metrics::equity_multiple(data),
            Metric::Irr => metrics::irr(data),
            Metric::AssetAnalysis => {
                match analyzers::run(package.property_type, data, as_of) {
                    Some(analysis) => {
                        computed.asset_analysis = Some(analysis);
                    }
                    None => {
                        computed.unavailable.insert(
                            metric.wire_name().to_string(),
                            absence_reason(metric).to_string(),
                        );
                    }
                }
                continue;
            }
        };

        match value {
            Some(v) => match metric {
                Metric::CapRate => computed.cap_rate = Some(v),
                Metric::CashOnCash => computed.cash_on_cash = Some(v),
                Metric::Dscr => computed.dscr = Some(v),
                Metric::Ltv => computed.ltv = Some(v),
                Metric::Grm => computed.grm = Some(v),
                Metric::PricePerSquareFoot => computed.price_per_square_foot = Some(v),
                Metric::PricePerUnit => computed.price_per_unit = Some(v),
                Metric::OperatingExpenseRatio => computed.operating_expense_ratio = Some(v),
                Metric::BreakEvenOccupancy => computed.break_even_occupancy = Some(v),
                Metric::EquityMultiple => computed.equity_multiple = Some(v),
                Metric::Irr => computed.irr = Some(v),
                Metric::AssetAnalysis => unreachable!("handled above"),
            },
            None => {
                computed.unavailable.insert(
                    metric.wire_name().to_string(),
                    absence_reason(metric).to_string(),
                );
            }
        }
    }

    let report = sanity::check_metrics(&computed, thresholds);
    let success = report.errors.is_empty();
    if !success {
        info!(
            "Analysis for package '{}' completed with {} sanity error(s)",
            package_id,
            report.errors.len()
        );
    }

    AnalysisResult {
        success,
        package_id: package_id.to_string(),
        property_type: Some(package.property_type),
        metrics: Some(computed),
        validation_errors,
        warnings: report.warnings,
        errors: report.errors,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OfficeTenant, PropertyType};
    use chrono::NaiveDate;

    fn thresholds() -> sanity::SanityThresholds {
        sanity::SanityThresholds::default()
    }

    fn basic_office_data() -> PropertyData {
        PropertyData {
            purchase_price: Some(1_000_000.0),
            current_noi: Some(70_000.0),
            gross_annual_income: Some(120_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        }
    }

    #[test]
    fn unknown_package_is_a_structured_failure() {
        let result = run_analysis("office-premium", &basic_office_data(), &thresholds());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
        assert!(result.metrics.is_none());
    }

    #[test]
    fn basic_package_computes_cap_rate_scenario() {
        let result = run_analysis("office-basic", &basic_office_data(), &thresholds());
        assert!(result.success);
        let metrics = result.metrics.unwrap();
        assert!((metrics.cap_rate.unwrap() - 7.0).abs() < 1e-9);
        assert_eq!(result.property_type, Some(PropertyType::Office));
    }

    #[test]
    fn missing_required_field_aborts_before_computation() {
        let mut data = basic_office_data();
        data.current_noi = None;
        let result = run_analysis("office-basic", &data, &thresholds());
        assert!(!result.success);
        assert!(result.validation_errors.contains_key("currentNOI"));
        assert!(result.metrics.is_none());
    }

    #[test]
    fn every_included_metric_is_present_or_explained() {
        let data = PropertyData {
            purchase_price: Some(2_000_000.0),
            current_noi: Some(150_000.0),
            gross_annual_income: Some(250_000.0),
            operating_expenses: Some(100_000.0),
            annual_cash_flow: Some(40_000.0),
            loan_amount: Some(1_400_000.0),
            interest_rate: Some(6.5),
            loan_term: Some(25.0),
            square_footage: Some(20_000.0),
            projected_hold_years: Some(7),
            exit_cap_rate: Some(7.5),
            office_tenants: Some(vec![OfficeTenant {
                name: "Acme Corp".into(),
                leased_sq_ft: Some(20_000.0),
                annual_rent: Some(250_000.0),
                lease_end: NaiveDate::from_ymd_opt(2033, 8, 7),
                credit_rating: Some("BBB".into()),
                industry: Some("insurance".into()),
            }]),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = run_analysis("office-institutional", &data, &thresholds());
        let metrics = result.metrics.unwrap();
        let package = packages::find("office-institutional").unwrap();
        for metric in package.included_metrics {
            let present = match metric {
                Metric::AssetAnalysis => metrics.asset_analysis.is_some(),
                other => metrics.scalar(*other).is_some(),
            };
            let explained = metrics.unavailable.contains_key(metric.wire_name());
            assert!(
                present ^ explained,
                "metric {} must be either present or explained",
                metric.wire_name()
            );
        }
    }

    #[test]
    fn every_package_satisfies_the_no_silent_drop_invariant() {
        // A record rich enough to pass every package's required-field check.
        let data = PropertyData {
            purchase_price: Some(2_000_000.0),
            current_noi: Some(140_000.0),
            gross_annual_income: Some(250_000.0),
            operating_expenses: Some(100_000.0),
            annual_cash_flow: Some(30_000.0),
            total_investment: Some(620_000.0),
            closing_costs: Some(20_000.0),
            loan_amount: Some(1_400_000.0),
            interest_rate: Some(6.0),
            loan_term: Some(30.0),
            square_footage: Some(25_000.0),
            unit_count: Some(40),
            market_avg_rent: Some(1_600.0),
            vacancy_rate: Some(5.0),
            projected_hold_years: Some(5),
            annual_cash_flow_growth: Some(2.0),
            exit_cap_rate: Some(7.0),
            clear_height_ft: Some(32.0),
            dock_doors: Some(20),
            office_buildout_pct: Some(10.0),
            truck_court_depth_ft: Some(130.0),
            office_tenants: Some(vec![OfficeTenant {
                name: "Acme Corp".into(),
                leased_sq_ft: Some(25_000.0),
                annual_rent: Some(240_000.0),
                lease_end: NaiveDate::from_ymd_opt(2032, 8, 7),
                credit_rating: Some("A-".into()),
                industry: Some("legal".into()),
            }]),
            retail_tenants: Some(vec![crate::models::RetailTenant {
                name: "Corner Grocer".into(),
                leased_sq_ft: Some(25_000.0),
                annual_rent: Some(240_000.0),
                annual_sales: Some(8_000_000.0),
                category: Some("grocery".into()),
                anchor: true,
                lease_end: NaiveDate::from_ymd_opt(2033, 1, 31),
            }]),
            unit_mix: Some(vec![crate::models::UnitMixEntry {
                unit_type: "1BR".into(),
                count: 40,
                avg_sq_ft: Some(650.0),
                avg_monthly_rent: Some(1_550.0),
            }]),
            components: Some(vec![
                crate::models::MixedUseComponent {
                    use_type: PropertyType::Retail,
                    sq_ft: Some(8_000.0),
                    annual_income: Some(90_000.0),
                },
                crate::models::MixedUseComponent {
                    use_type: PropertyType::Multifamily,
                    sq_ft: Some(17_000.0),
                    annual_income: Some(160_000.0),
                },
            ]),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
        };

        for package in packages::catalog() {
            let result = run_analysis(package.id, &data, &thresholds());
            assert!(
                result.validation_errors.is_empty(),
                "{}: unexpected validation errors {:?}",
                package.id,
                result.validation_errors
            );
            let metrics = result.metrics.expect(package.id);
            for metric in package.included_metrics {
                let present = match metric {
                    Metric::AssetAnalysis => metrics.asset_analysis.is_some(),
                    other => metrics.scalar(*other).is_some(),
                };
                let explained = metrics.unavailable.contains_key(metric.wire_name());
                assert!(
                    present ^ explained,
                    "{}: metric {} must be either present or explained",
                    package.id,
                    metric.wire_name()
                );
            }
        }
    }

    #[test]
    fn optional_metric_without_inputs_is_explained_not_dropped() {
        // multifamily-basic includes pricePerUnit but does not require a
        // unit count; omitting it must leave a reason, not a silent gap.
        let data = PropertyData {
            purchase_price: Some(4_000_000.0),
            current_noi: Some(260_000.0),
            gross_annual_income: Some(420_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = run_analysis("multifamily-basic", &data, &thresholds());
        assert!(result.success);
        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.price_per_unit, None);
        assert!(metrics.unavailable.contains_key("pricePerUnit"));
        assert!(metrics.unavailable.contains_key("pricePerSquareFoot"));
    }

    #[test]
    fn dscr_scenario_with_and_without_noi() {
        let data = PropertyData {
            purchase_price: Some(1_500_000.0),
            current_noi: Some(100_000.0),
            gross_annual_income: Some(180_000.0),
            operating_expenses: Some(80_000.0),
            annual_cash_flow: Some(28_000.0),
            loan_amount: Some(1_000_000.0),
            interest_rate: Some(6.0),
            loan_term: Some(30.0),
            square_footage: Some(15_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = run_analysis("office-advanced", &data, &thresholds());
        let coverage = result.metrics.unwrap().dscr.unwrap();
        assert!(coverage.is_finite() && coverage > 0.0);

        let mut without_noi = data.clone();
        without_noi.current_noi = None;
        let rejected = run_analysis("office-advanced", &without_noi, &thresholds());
        assert!(!rejected.success);
        assert!(rejected.validation_errors.contains_key("currentNOI"));
    }

    #[test]
    fn ltv_above_100_fails_the_run_with_partial_metrics() {
        let data = PropertyData {
            purchase_price: Some(1_000_000.0),
            current_noi: Some(70_000.0),
            gross_annual_income: Some(120_000.0),
            operating_expenses: Some(50_000.0),
            annual_cash_flow: Some(20_000.0),
            loan_amount: Some(1_100_000.0),
            interest_rate: Some(6.0),
            loan_term: Some(30.0),
            square_footage: Some(10_000.0),
            total_investment: Some(150_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = run_analysis("office-advanced", &data, &thresholds());
        assert!(!result.success);
        assert!(result.errors.iter().any(|e| e.contains("LTV")));
        // Partial results are still returned alongside the error.
        let metrics = result.metrics.unwrap();
        assert!((metrics.ltv.unwrap() - 110.0).abs() < 1e-9);
        assert!(metrics.cap_rate.is_some());
    }

    #[test]
    fn walt_scenario_five_year_lease() {
        let data = PropertyData {
            purchase_price: Some(2_000_000.0),
            current_noi: Some(150_000.0),
            gross_annual_income: Some(250_000.0),
            operating_expenses: Some(100_000.0),
            annual_cash_flow: Some(40_000.0),
            loan_amount: Some(1_400_000.0),
            interest_rate: Some(6.5),
            loan_term: Some(25.0),
            square_footage: Some(20_000.0),
            projected_hold_years: Some(7),
            exit_cap_rate: Some(7.5),
            annual_cash_flow_growth: Some(2.0),
            office_tenants: Some(vec![OfficeTenant {
                name: "Acme Corp".into(),
                leased_sq_ft: Some(20_000.0),
                annual_rent: Some(250_000.0),
                lease_end: NaiveDate::from_ymd_opt(2031, 8, 7),
                credit_rating: Some("A".into()),
                industry: None,
            }]),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = run_analysis("office-institutional", &data, &thresholds());
        let metrics = result.metrics.unwrap();
        match metrics.asset_analysis.unwrap() {
            crate::models::AssetAnalysis::Office(office) => {
                let walt = office.walt_years.unwrap();
                assert!((walt - 5.0).abs() < 0.01, "got {}", walt);
            }
            other => panic!("expected office analysis, got {:?}", other),
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let data = basic_office_data();
        let first = run_analysis("office-basic", &data, &thresholds());
        let second = run_analysis("office-basic", &data, &thresholds());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
