// src/services/validation.rs
//
// Field-level guards run before any metric is computed. Errors are collected
// into a key -> message map and returned to the caller; nothing here throws.
use std::collections::BTreeMap;

use crate::models::{CalculationPackage, PropertyData, RequiredField};

pub type ValidationErrors = BTreeMap<String, String>;

/// Missing-required-field check for a package. One entry per absent field.
pub fn check_required_fields(
    package: &CalculationPackage,
    data: &PropertyData,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in package.required_fields {
        if !field.is_present(data) {
            errors.insert(
                field.key().to_string(),
                format!("{} is required for the '{}' package", field.label(), package.name),
            );
        }
    }
    errors
}

fn check_positive(errors: &mut ValidationErrors, key: &str, label: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() || v <= 0.0 {
            errors.insert(key.to_string(), format!("{} must be a positive number", label));
        }
    }
}

fn check_non_negative(errors: &mut ValidationErrors, key: &str, label: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            errors.insert(key.to_string(), format!("{} cannot be negative", label));
        }
    }
}

fn check_range(
    errors: &mut ValidationErrors,
    key: &str,
    label: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
) {
    if let Some(v) = value {
        if !v.is_finite() || v < min || v > max {
            errors.insert(
                key.to_string(),
                format!("{} must be between {} and {}", label, min, max),
            );
        }
    }
}

/// Shape and range checks over whatever fields the record carries. Only
/// provided fields are judged; absence is the required-field check's job.
pub fn check_field_values(data: &PropertyData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    check_positive(&mut errors, RequiredField::PurchasePrice.key(), "Purchase price", data.purchase_price);
    check_positive(&mut errors, RequiredField::GrossAnnualIncome.key(), "Gross annual income", data.gross_annual_income);
    check_positive(&mut errors, RequiredField::SquareFootage.key(), "Square footage", data.square_footage);
    check_positive(&mut errors, "totalInvestment", "Total investment", data.total_investment);

    check_non_negative(&mut errors, RequiredField::CurrentNoi.key(), "Current NOI", data.current_noi);
    check_non_negative(&mut errors, RequiredField::OperatingExpenses.key(), "Operating expenses", data.operating_expenses);
    check_non_negative(&mut errors, RequiredField::LoanAmount.key(), "Loan amount", data.loan_amount);
    check_non_negative(&mut errors, "closingCosts", "Closing costs", data.closing_costs);
    check_non_negative(&mut errors, "marketAvgRent", "Market average rent", data.market_avg_rent);

    check_range(&mut errors, RequiredField::InterestRate.key(), "Interest rate", data.interest_rate, 0.0, 30.0);
    check_range(&mut errors, RequiredField::LoanTerm.key(), "Loan term", data.loan_term, 1.0, 50.0);
    check_range(&mut errors, "vacancyRate", "Vacancy rate", data.vacancy_rate, 0.0, 100.0);
    check_range(&mut errors, RequiredField::ExitCapRate.key(), "Exit cap rate", data.exit_cap_rate, 0.1, 30.0);
    check_range(&mut errors, "officeBuildoutPct", "Office build-out share", data.office_buildout_pct, 0.0, 100.0);
    check_range(&mut errors, "annualCashFlowGrowth", "Cash flow growth", data.annual_cash_flow_growth, -20.0, 50.0);

    if let Some(units) = data.unit_count {
        if units == 0 {
            errors.insert(
                RequiredField::UnitCount.key().to_string(),
                "Unit count must be at least 1".to_string(),
            );
        }
    }
    if let Some(hold) = data.projected_hold_years {
        if hold == 0 || hold > 50 {
            errors.insert(
                RequiredField::ProjectedHoldYears.key().to_string(),
                "Projected hold period must be between 1 and 50 years".to_string(),
            );
        }
    }

    if let Some(tenants) = &data.office_tenants {
        for (i, tenant) in tenants.iter().enumerate() {
            if tenant.name.trim().is_empty() {
                errors.insert(
                    format!("officeTenants[{}].name", i),
                    "Tenant name cannot be blank".to_string(),
                );
            }
            if let Some(sq_ft) = tenant.leased_sq_ft {
                if !sq_ft.is_finite() || sq_ft <= 0.0 {
                    errors.insert(
                        format!("officeTenants[{}].leasedSqFt", i),
                        "Leased square footage must be positive".to_string(),
                    );
                }
            }
        }
    }
    if let Some(tenants) = &data.retail_tenants {
        for (i, tenant) in tenants.iter().enumerate() {
            if tenant.name.trim().is_empty() {
                errors.insert(
                    format!("retailTenants[{}].name", i),
                    "Tenant name cannot be blank".to_string(),
                );
            }
            if let Some(sq_ft) = tenant.leased_sq_ft {
                if !sq_ft.is_finite() || sq_ft <= 0.0 {
                    errors.insert(
                        format!("retailTenants[{}].leasedSqFt", i),
                        "Leased square footage must be positive".to_string(),
                    );
                }
            }
        }
    }
    if let Some(mix) = &data.unit_mix {
        for (i, entry) in mix.iter().enumerate() {
            if entry.count == 0 {
                errors.insert(
                    format!("unitMix[{}].count", i),
                    "Unit count must be at least 1".to_string(),
                );
            }
        }
    }

    errors
}
