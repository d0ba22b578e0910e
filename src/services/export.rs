// src/services/export.rs
//
// Serializes a finished AnalysisResult for download. JSON is the result
// object verbatim; CSV is a flat section/item/value/note table. Rounding
// happens here, at presentation time.
use anyhow::{anyhow, Context, Result};
use csv::Writer;

use crate::models::{AnalysisResult, Metric};

const ALL_SCALAR_METRICS: &[(Metric, &str)] = &[
    (Metric::CapRate, "Cap Rate (%)"),
    (Metric::CashOnCash, "Cash-on-Cash (%)"),
    (Metric::Dscr, "DSCR"),
    (Metric::Ltv, "LTV (%)"),
    (Metric::Grm, "GRM"),
    (Metric::PricePerSquareFoot, "Price per SF ($)"),
    (Metric::PricePerUnit, "Price per Unit ($)"),
    (Metric::OperatingExpenseRatio, "Operating Expense Ratio (%)"),
    (Metric::BreakEvenOccupancy, "Break-Even Occupancy (%)"),
    (Metric::EquityMultiple, "Equity Multiple (x)"),
    (Metric::Irr, "IRR (%)"),
];

pub fn file_stem(result: &AnalysisResult) -> String {
    format!("cre-analysis-{}", result.package_id)
}

pub fn to_json(result: &AnalysisResult) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(result).context("serializing analysis result")
}

pub fn to_csv(result: &AnalysisResult) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["section", "item", "value", "note"])?;

    writer.write_record(["summary", "packageId", &result.package_id, ""])?;
    writer.write_record([
        "summary",
        "propertyType",
        result
            .property_type
            .map(|pt| pt.as_str())
            .unwrap_or_default(),
        "",
    ])?;
    writer.write_record([
        "summary",
        "success",
        if result.success { "true" } else { "false" },
        "",
    ])?;

    if let Some(metrics) = &result.metrics {
        for (metric, label) in ALL_SCALAR_METRICS {
            if let Some(value) = metrics.scalar(*metric) {
                writer.write_record(["metric", label, &format!("{:.2}", value), ""])?;
            } else if let Some(reason) = metrics.unavailable.get(metric.wire_name()) {
                writer.write_record(["metric", label, "", reason])?;
            }
        }
        if let Some(reason) = metrics.unavailable.get(Metric::AssetAnalysis.wire_name()) {
            writer.write_record(["metric", "Asset Analysis", "", reason])?;
        }
    }

    for (field, message) in &result.validation_errors {
        writer.write_record(["validationError", field, "", message])?;
    }
    for warning in &result.warnings {
        writer.write_record(["warning", "", "", warning])?;
    }
    for error in &result.errors {
        writer.write_record(["error", "", "", error])?;
    }
    if let Some(error) = &result.error {
        writer.write_record(["error", "", "", error])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing csv export: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyData;
    use crate::services::{calculator, sanity::SanityThresholds};
    use chrono::NaiveDate;

    fn sample_result() -> AnalysisResult {
        let data = PropertyData {
            purchase_price: Some(1_000_000.0),
            current_noi: Some(70_000.0),
            gross_annual_income: Some(120_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        calculator::run_analysis("office-basic", &data, &SanityThresholds::default())
    }

    #[test]
    fn json_export_round_trips() {
        let result = sample_result();
        let bytes = to_json(&result).unwrap();
        let parsed: AnalysisResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn csv_export_lists_computed_metrics_with_values() {
        let result = sample_result();
        let text = String::from_utf8(to_csv(&result).unwrap()).unwrap();
        assert!(text.starts_with("section,item,value,note"));
        assert!(text.contains("metric,Cap Rate (%),7.00,"));
        assert!(text.contains("summary,packageId,office-basic,"));
        // Metrics the package never enabled do not appear at all.
        assert!(!text.contains("DSCR"));
    }

    #[test]
    fn csv_export_carries_absence_notes() {
        let data = PropertyData {
            purchase_price: Some(4_000_000.0),
            current_noi: Some(260_000.0),
            gross_annual_income: Some(420_000.0),
            analysis_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            ..Default::default()
        };
        let result = calculator::run_analysis(
            "multifamily-basic",
            &data,
            &SanityThresholds::default(),
        );
        let text = String::from_utf8(to_csv(&result).unwrap()).unwrap();
        assert!(text.contains("metric,Price per Unit ($),,"));
    }

    #[test]
    fn filename_is_derived_from_the_package() {
        assert_eq!(file_stem(&sample_result()), "cre-analysis-office-basic");
    }
}
