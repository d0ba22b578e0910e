// src/services/packages.rs
//
// The static package catalog: for each property type, three tiers of
// analysis. A package is pure data; lookup is by id or property type.
use crate::models::{
    CalculationPackage, Metric, PackageTier, PropertyType, RequiredField,
};

const BASIC_METRICS: &[Metric] = &[Metric::CapRate, Metric::Grm, Metric::PricePerSquareFoot];

const BASIC_METRICS_MF: &[Metric] = &[
    Metric::CapRate,
    Metric::Grm,
    Metric::PricePerSquareFoot,
    Metric::PricePerUnit,
];

const ADVANCED_METRICS: &[Metric] = &[
    Metric::CapRate,
    Metric::Grm,
    Metric::PricePerSquareFoot,
    Metric::CashOnCash,
    Metric::Dscr,
    Metric::Ltv,
    Metric::OperatingExpenseRatio,
    Metric::BreakEvenOccupancy,
];

const ADVANCED_METRICS_MF: &[Metric] = &[
    Metric::CapRate,
    Metric::Grm,
    Metric::PricePerSquareFoot,
    Metric::PricePerUnit,
    Metric::CashOnCash,
    Metric::Dscr,
    Metric::Ltv,
    Metric::OperatingExpenseRatio,
    Metric::BreakEvenOccupancy,
];

const INSTITUTIONAL_METRICS: &[Metric] = &[
    Metric::CapRate,
    Metric::Grm,
    Metric::PricePerSquareFoot,
    Metric::CashOnCash,
    Metric::Dscr,
    Metric::Ltv,
    Metric::OperatingExpenseRatio,
    Metric::BreakEvenOccupancy,
    Metric::EquityMultiple,
    Metric::Irr,
    Metric::AssetAnalysis,
];

const INSTITUTIONAL_METRICS_MF: &[Metric] = &[
    Metric::CapRate,
    Metric::Grm,
    Metric::PricePerSquareFoot,
    Metric::PricePerUnit,
    Metric::CashOnCash,
    Metric::Dscr,
    Metric::Ltv,
    Metric::OperatingExpenseRatio,
    Metric::BreakEvenOccupancy,
    Metric::EquityMultiple,
    Metric::Irr,
    Metric::AssetAnalysis,
];

const BASIC_FIELDS: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
];

const ADVANCED_FIELDS: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
];

const ADVANCED_FIELDS_MF: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::UnitCount,
];

const INSTITUTIONAL_FIELDS_OFFICE: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::ProjectedHoldYears,
    RequiredField::ExitCapRate,
    RequiredField::OfficeTenants,
];

const INSTITUTIONAL_FIELDS_RETAIL: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::ProjectedHoldYears,
    RequiredField::ExitCapRate,
    RequiredField::RetailTenants,
];

const INSTITUTIONAL_FIELDS_INDUSTRIAL: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::ProjectedHoldYears,
    RequiredField::ExitCapRate,
    RequiredField::ClearHeightFt,
];

const INSTITUTIONAL_FIELDS_MF: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::UnitCount,
    RequiredField::ProjectedHoldYears,
    RequiredField::ExitCapRate,
    RequiredField::UnitMix,
];

const INSTITUTIONAL_FIELDS_MIXED: &[RequiredField] = &[
    RequiredField::PurchasePrice,
    RequiredField::CurrentNoi,
    RequiredField::GrossAnnualIncome,
    RequiredField::OperatingExpenses,
    RequiredField::AnnualCashFlow,
    RequiredField::LoanAmount,
    RequiredField::InterestRate,
    RequiredField::LoanTerm,
    RequiredField::SquareFootage,
    RequiredField::ProjectedHoldYears,
    RequiredField::ExitCapRate,
    RequiredField::Components,
];

static CATALOG: &[CalculationPackage] = &[
    // Office
    CalculationPackage {
        id: "office-basic",
        name: "Office Snapshot",
        tier: PackageTier::Basic,
        property_type: PropertyType::Office,
        description: "Core pricing ratios for a quick office screen",
        included_metrics: BASIC_METRICS,
        required_fields: BASIC_FIELDS,
    },
    CalculationPackage {
        id: "office-advanced",
        name: "Office Financing Review",
        tier: PackageTier::Advanced,
        property_type: PropertyType::Office,
        description: "Adds leverage, coverage and expense metrics to the screen",
        included_metrics: ADVANCED_METRICS,
        required_fields: ADVANCED_FIELDS,
    },
    CalculationPackage {
        id: "office-institutional",
        name: "Office Underwriting",
        tier: PackageTier::Institutional,
        property_type: PropertyType::Office,
        description: "Full underwriting with hold projections and tenant roster analysis",
        included_metrics: INSTITUTIONAL_METRICS,
        required_fields: INSTITUTIONAL_FIELDS_OFFICE,
    },
    // Retail
    CalculationPackage {
        id: "retail-basic",
        name: "Retail Snapshot",
        tier: PackageTier::Basic,
        property_type: PropertyType::Retail,
        description: "Core pricing ratios for a quick retail screen",
        included_metrics: BASIC_METRICS,
        required_fields: BASIC_FIELDS,
    },
    CalculationPackage {
        id: "retail-advanced",
        name: "Retail Financing Review",
        tier: PackageTier::Advanced,
        property_type: PropertyType::Retail,
        description: "Adds leverage, coverage and expense metrics to the screen",
        included_metrics: ADVANCED_METRICS,
        required_fields: ADVANCED_FIELDS,
    },
    CalculationPackage {
        id: "retail-institutional",
        name: "Retail Underwriting",
        tier: PackageTier::Institutional,
        property_type: PropertyType::Retail,
        description: "Full underwriting with hold projections and tenant sales analysis",
        included_metrics: INSTITUTIONAL_METRICS,
        required_fields: INSTITUTIONAL_FIELDS_RETAIL,
    },
    // Industrial
    CalculationPackage {
        id: "industrial-basic",
        name: "Industrial Snapshot",
        tier: PackageTier::Basic,
        property_type: PropertyType::Industrial,
        description: "Core pricing ratios for a quick industrial screen",
        included_metrics: BASIC_METRICS,
        required_fields: BASIC_FIELDS,
    },
    CalculationPackage {
        id: "industrial-advanced",
        name: "Industrial Financing Review",
        tier: PackageTier::Advanced,
        property_type: PropertyType::Industrial,
        description: "Adds leverage, coverage and expense metrics to the screen",
        included_metrics: ADVANCED_METRICS,
        required_fields: ADVANCED_FIELDS,
    },
    CalculationPackage {
        id: "industrial-institutional",
        name: "Industrial Underwriting",
        tier: PackageTier::Institutional,
        property_type: PropertyType::Industrial,
        description: "Full underwriting with hold projections and building functionality scoring",
        included_metrics: INSTITUTIONAL_METRICS,
        required_fields: INSTITUTIONAL_FIELDS_INDUSTRIAL,
    },
    // Multifamily
    CalculationPackage {
        id: "multifamily-basic",
        name: "Multifamily Snapshot",
        tier: PackageTier::Basic,
        property_type: PropertyType::Multifamily,
        description: "Core pricing ratios for a quick multifamily screen",
        included_metrics: BASIC_METRICS_MF,
        required_fields: BASIC_FIELDS,
    },
    CalculationPackage {
        id: "multifamily-advanced",
        name: "Multifamily Financing Review",
        tier: PackageTier::Advanced,
        property_type: PropertyType::Multifamily,
        description: "Adds leverage, coverage and per-unit metrics to the screen",
        included_metrics: ADVANCED_METRICS_MF,
        required_fields: ADVANCED_FIELDS_MF,
    },
    CalculationPackage {
        id: "multifamily-institutional",
        name: "Multifamily Underwriting",
        tier: PackageTier::Institutional,
        property_type: PropertyType::Multifamily,
        description: "Full underwriting with hold projections and unit-mix analysis",
        included_metrics: INSTITUTIONAL_METRICS_MF,
        required_fields: INSTITUTIONAL_FIELDS_MF,
    },
    // Mixed-use
    CalculationPackage {
        id: "mixed-use-basic",
        name: "Mixed-Use Snapshot",
        tier: PackageTier::Basic,
        property_type: PropertyType::MixedUse,
        description: "Core pricing ratios for a quick mixed-use screen",
        included_metrics: BASIC_METRICS,
        required_fields: BASIC_FIELDS,
    },
    CalculationPackage {
        id: "mixed-use-advanced",
        name: "Mixed-Use Financing Review",
        tier: PackageTier::Advanced,
        property_type: PropertyType::MixedUse,
        description: "Adds leverage, coverage and expense metrics to the screen",
        included_metrics: ADVANCED_METRICS,
        required_fields: ADVANCED_FIELDS,
    },
    CalculationPackage {
        id: "mixed-use-institutional",
        name: "Mixed-Use Underwriting",
        tier: PackageTier::Institutional,
        property_type: PropertyType::MixedUse,
        description: "Full underwriting with hold projections and component synergy analysis",
        included_metrics: INSTITUTIONAL_METRICS,
        required_fields: INSTITUTIONAL_FIELDS_MIXED,
    },
];

pub fn catalog() -> &'static [CalculationPackage] {
    CATALOG
}

pub fn find(id: &str) -> Option<&'static CalculationPackage> {
    CATALOG.iter().find(|p| p.id == id)
}

pub fn for_property_type(property_type: PropertyType) -> Vec<&'static CalculationPackage> {
    CATALOG
        .iter()
        .filter(|p| p.property_type == property_type)
        .collect()
}
