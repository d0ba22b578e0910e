// src/bin/test_analysis.rs
use chrono::NaiveDate;
use cre_dashboard_api::models::{OfficeTenant, PropertyData};
use cre_dashboard_api::services::calculator::run_analysis;
use cre_dashboard_api::services::sanity::SanityThresholds;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();
    let thresholds = SanityThresholds::default();

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
            name: "Acme Insurance".into(),
            leased_sq_ft: Some(12_000.0),
            annual_rent: Some(160_000.0),
            lease_end: NaiveDate::from_ymd_opt(2032, 6, 30),
            credit_rating: Some("BBB+".into()),
            industry: Some("insurance".into()),
        }]),
        analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
        ..Default::default()
    };

    for package_id in ["office-basic", "office-advanced", "office-institutional"] {
        let result = run_analysis(package_id, &data, &thresholds);
        println!("=== {} ===", package_id);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
