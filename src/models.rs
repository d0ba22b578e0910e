// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Office,
    Retail,
    Industrial,
    Multifamily,
    MixedUse,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Office => "office",
            PropertyType::Retail => "retail",
            PropertyType::Industrial => "industrial",
            PropertyType::Multifamily => "multifamily",
            PropertyType::MixedUse => "mixed-use",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "office" => Ok(PropertyType::Office),
            "retail" => Ok(PropertyType::Retail),
            "industrial" => Ok(PropertyType::Industrial),
            "multifamily" => Ok(PropertyType::Multifamily),
            "mixed-use" => Ok(PropertyType::MixedUse),
            other => Err(format!("unknown property type '{}'", other)),
        }
    }
}

/// One office tenant as entered on the rent-roll form. Everything beyond the
/// name is optional; analyzers skip records missing the fields they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeTenant {
    pub name: String,
    pub leased_sq_ft: Option<f64>,
    pub annual_rent: Option<f64>,
    pub lease_end: Option<NaiveDate>,
    pub credit_rating: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailTenant {
    pub name: String,
    pub leased_sq_ft: Option<f64>,
    pub annual_rent: Option<f64>,
    pub annual_sales: Option<f64>,
    pub category: Option<String>,
    #[serde(default)]
    pub anchor: bool,
    pub lease_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMixEntry {
    /// e.g. "studio", "1BR", "2BR"
    pub unit_type: String,
    pub count: u32,
    pub avg_sq_ft: Option<f64>,
    pub avg_monthly_rent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedUseComponent {
    #[serde(rename = "use")]
    pub use_type: PropertyType,
    pub sq_ft: Option<f64>,
    pub annual_income: Option<f64>,
}

/// The flat property record a single analysis runs against. Populated from
/// form input, read-only afterward; which fields must be present depends on
/// the selected calculation package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyData {
    pub purchase_price: Option<f64>,
    #[serde(rename = "currentNOI")]
    pub current_noi: Option<f64>,
    pub gross_annual_income: Option<f64>,
    pub operating_expenses: Option<f64>,
    pub annual_cash_flow: Option<f64>,
    pub total_investment: Option<f64>,
    pub closing_costs: Option<f64>,

    pub loan_amount: Option<f64>,
    /// Annual rate in percent, e.g. 6.25
    pub interest_rate: Option<f64>,
    /// Amortization term in years
    pub loan_term: Option<f64>,

    pub square_footage: Option<f64>,
    pub unit_count: Option<u32>,
    pub market_avg_rent: Option<f64>,
    /// Percent, 0-100
    pub vacancy_rate: Option<f64>,

    pub projected_hold_years: Option<u32>,
    /// Annual growth applied to cash-flow and NOI projections, percent
    pub annual_cash_flow_growth: Option<f64>,
    /// Percent cap rate applied to exit-year NOI
    pub exit_cap_rate: Option<f64>,

    // Industrial building attributes
    pub clear_height_ft: Option<f64>,
    pub dock_doors: Option<u32>,
    /// Share of building finished as office, percent
    pub office_buildout_pct: Option<f64>,
    pub truck_court_depth_ft: Option<f64>,

    pub office_tenants: Option<Vec<OfficeTenant>>,
    pub retail_tenants: Option<Vec<RetailTenant>>,
    pub unit_mix: Option<Vec<UnitMixEntry>>,
    pub components: Option<Vec<MixedUseComponent>>,

    /// Pins "today" for lease-term math; defaults to the current UTC date.
    pub analysis_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    CapRate,
    CashOnCash,
    Dscr,
    Ltv,
    Grm,
    PricePerSquareFoot,
    PricePerUnit,
    OperatingExpenseRatio,
    BreakEvenOccupancy,
    EquityMultiple,
    Irr,
    AssetAnalysis,
}

impl Metric {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Metric::CapRate => "capRate",
            Metric::CashOnCash => "cashOnCash",
            Metric::Dscr => "dscr",
            Metric::Ltv => "ltv",
            Metric::Grm => "grm",
            Metric::PricePerSquareFoot => "pricePerSquareFoot",
            Metric::PricePerUnit => "pricePerUnit",
            Metric::OperatingExpenseRatio => "operatingExpenseRatio",
            Metric::BreakEvenOccupancy => "breakEvenOccupancy",
            Metric::EquityMultiple => "equityMultiple",
            Metric::Irr => "irr",
            Metric::AssetAnalysis => "assetAnalysis",
        }
    }
}

/// Which metrics a single run should compute, derived from the selected
/// package. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFlags {
    enabled: BTreeSet<Metric>,
}

impl MetricFlags {
    pub fn from_metrics(metrics: &[Metric]) -> Self {
        MetricFlags {
            enabled: metrics.iter().copied().collect(),
        }
    }

    pub fn is_enabled(&self, metric: Metric) -> bool {
        self.enabled.contains(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        self.enabled.iter().copied()
    }
}

/// Fields a package can require. The descriptor mapping is exhaustive:
/// adding a variant without wiring `key`/`label`/`is_present` fails the
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    PurchasePrice,
    #[serde(rename = "currentNOI")]
    CurrentNoi,
    GrossAnnualIncome,
    OperatingExpenses,
    AnnualCashFlow,
    LoanAmount,
    InterestRate,
    LoanTerm,
    SquareFootage,
    UnitCount,
    ProjectedHoldYears,
    ExitCapRate,
    OfficeTenants,
    RetailTenants,
    UnitMix,
    Components,
    ClearHeightFt,
}

impl RequiredField {
    pub fn key(&self) -> &'static str {
        match self {
            RequiredField::PurchasePrice => "purchasePrice",
            RequiredField::CurrentNoi => "currentNOI",
            RequiredField::GrossAnnualIncome => "grossAnnualIncome",
            RequiredField::OperatingExpenses => "operatingExpenses",
            RequiredField::AnnualCashFlow => "annualCashFlow",
            RequiredField::LoanAmount => "loanAmount",
            RequiredField::InterestRate => "interestRate",
            RequiredField::LoanTerm => "loanTerm",
            RequiredField::SquareFootage => "squareFootage",
            RequiredField::UnitCount => "unitCount",
            RequiredField::ProjectedHoldYears => "projectedHoldYears",
            RequiredField::ExitCapRate => "exitCapRate",
            RequiredField::OfficeTenants => "officeTenants",
            RequiredField::RetailTenants => "retailTenants",
            RequiredField::UnitMix => "unitMix",
            RequiredField::Components => "components",
            RequiredField::ClearHeightFt => "clearHeightFt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::PurchasePrice => "Purchase price",
            RequiredField::CurrentNoi => "Current NOI",
            RequiredField::GrossAnnualIncome => "Gross annual income",
            RequiredField::OperatingExpenses => "Operating expenses",
            RequiredField::AnnualCashFlow => "Annual cash flow",
            RequiredField::LoanAmount => "Loan amount",
            RequiredField::InterestRate => "Interest rate",
            RequiredField::LoanTerm => "Loan term",
            RequiredField::SquareFootage => "Square footage",
            RequiredField::UnitCount => "Unit count",
            RequiredField::ProjectedHoldYears => "Projected hold period",
            RequiredField::ExitCapRate => "Exit cap rate",
            RequiredField::OfficeTenants => "Office tenant roster",
            RequiredField::RetailTenants => "Retail tenant roster",
            RequiredField::UnitMix => "Unit mix",
            RequiredField::Components => "Use components",
            RequiredField::ClearHeightFt => "Clear height",
        }
    }

    pub fn is_present(&self, data: &PropertyData) -> bool {
        match self {
            RequiredField::PurchasePrice => data.purchase_price.is_some(),
            RequiredField::CurrentNoi => data.current_noi.is_some(),
            RequiredField::GrossAnnualIncome => data.gross_annual_income.is_some(),
            RequiredField::OperatingExpenses => data.operating_expenses.is_some(),
            RequiredField::AnnualCashFlow => data.annual_cash_flow.is_some(),
            RequiredField::LoanAmount => data.loan_amount.is_some(),
            RequiredField::InterestRate => data.interest_rate.is_some(),
            RequiredField::LoanTerm => data.loan_term.is_some(),
            RequiredField::SquareFootage => data.square_footage.is_some(),
            RequiredField::UnitCount => data.unit_count.is_some(),
            RequiredField::ProjectedHoldYears => data.projected_hold_years.is_some(),
            RequiredField::ExitCapRate => data.exit_cap_rate.is_some(),
            RequiredField::OfficeTenants => {
                data.office_tenants.as_ref().map_or(false, |t| !t.is_empty())
            }
            RequiredField::RetailTenants => {
                data.retail_tenants.as_ref().map_or(false, |t| !t.is_empty())
            }
            RequiredField::UnitMix => data.unit_mix.as_ref().map_or(false, |u| !u.is_empty()),
            RequiredField::Components => {
                data.components.as_ref().map_or(false, |c| !c.is_empty())
            }
            RequiredField::ClearHeightFt => data.clear_height_ft.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Basic,
    Advanced,
    Institutional,
}

/// A catalog entry: which metrics to run and which fields must be present.
/// Defined at build time, immutable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationPackage {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: PackageTier,
    pub property_type: PropertyType,
    pub description: &'static str,
    pub included_metrics: &'static [Metric],
    pub required_fields: &'static [RequiredField],
}

// ---------------------------------------------------------------------------
// Analyzer sub-reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeAnalysis {
    pub tenant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walt_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_credit_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_profile: Option<String>,
    /// Herfindahl index over rent shares, 0-1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_tenant_share_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollover_within_24_months_pct: Option<f64>,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailAnalysis {
    pub tenant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_sales_per_sq_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_occupancy_cost_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_share_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_tenancy_risk: Option<String>,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalityFactors {
    pub clear_height: f64,
    pub loading: f64,
    pub office_buildout: f64,
    pub truck_court: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustrialAnalysis {
    /// 0-100 weighted building functionality score
    pub functionality_score: f64,
    pub spec_class: String,
    pub factors: FunctionalityFactors,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultifamilyAnalysis {
    pub total_units: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_monthly_rent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_per_unit_year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rent_per_sq_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_premium_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioning: Option<String>,
    /// 1 - Herfindahl over unit-count shares, 0-1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_mix_diversity: Option<f64>,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentShare {
    #[serde(rename = "use")]
    pub use_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_share_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sq_ft_share_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedUseAnalysis {
    pub components: Vec<ComponentShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_use: Option<PropertyType>,
    /// 1 - Herfindahl over income shares, 0-1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversification_score: Option<f64>,
    pub synergy_score: f64,
    pub conflict_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_option_value: Option<f64>,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "propertyType", rename_all = "kebab-case")]
pub enum AssetAnalysis {
    Office(OfficeAnalysis),
    Retail(RetailAnalysis),
    Industrial(IndustrialAnalysis),
    Multifamily(MultifamilyAnalysis),
    MixedUse(MixedUseAnalysis),
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One field per metric, populated only when its flag was set and the inputs
/// supported it. Every enabled-but-absent metric gets an `unavailable` entry
/// explaining why; nothing is dropped silently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatedMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_on_cash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_square_foot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_expense_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_occupancy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_multiple: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_analysis: Option<AssetAnalysis>,
    /// metric wire name -> reason it could not be computed
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unavailable: BTreeMap<String, String>,
}

impl CalculatedMetrics {
    /// Scalar value for a metric, if it was computed. `AssetAnalysis` has no
    /// scalar and always returns `None` here.
    pub fn scalar(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CapRate => self.cap_rate,
            Metric::CashOnCash => self.cash_on_cash,
            Metric::Dscr => self.dscr,
            Metric::Ltv => self.ltv,
            Metric::Grm => self.grm,
            Metric::PricePerSquareFoot => self.price_per_square_foot,
            Metric::PricePerUnit => self.price_per_unit,
            Metric::OperatingExpenseRatio => self.operating_expense_ratio,
            Metric::BreakEvenOccupancy => self.break_even_occupancy,
            Metric::EquityMultiple => self.equity_multiple,
            Metric::Irr => self.irr,
            Metric::AssetAnalysis => None,
        }
    }
}

/// The single structured response of one analysis run. Anticipated failures
/// (unknown package, missing fields, out-of-range results) populate the
/// fields below; they are never surfaced as transport errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    pub package_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CalculatedMetrics>,
    /// field wire key -> message
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub validation_errors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Hard sanity violations; non-empty forces `success == false`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Generic failure message for non-field-level errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn failure(package_id: &str, message: impl Into<String>) -> Self {
        AnalysisResult {
            success: false,
            package_id: package_id.to_string(),
            property_type: None,
            metrics: None,
            validation_errors: BTreeMap::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /api/v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub package_id: String,
    pub property_data: PropertyData,
}
