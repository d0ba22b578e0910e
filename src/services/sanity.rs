// src/services/sanity.rs
//
// Post-hoc range checks on computed metrics. Hard errors mark values outside
// what is physically possible; warnings mark values outside the typical
// range. The thresholds are policy constants, not business rules; Default
// holds the shipped values and callers may substitute their own.
use crate::models::CalculatedMetrics;

#[derive(Debug, Clone, PartialEq)]
pub struct SanityThresholds {
    pub min_cap_rate_pct: f64,
    pub max_cap_rate_pct: f64,
    pub min_dscr: f64,
    pub warn_ltv_pct: f64,
    pub max_ltv_pct: f64,
    pub warn_cash_on_cash_pct: f64,
    pub min_grm: f64,
    pub max_grm: f64,
    pub warn_expense_ratio_pct: f64,
}

impl Default for SanityThresholds {
    fn default() -> Self {
        SanityThresholds {
            min_cap_rate_pct: 2.0,
            max_cap_rate_pct: 20.0,
            min_dscr: 1.0,
            warn_ltv_pct: 85.0,
            max_ltv_pct: 100.0,
            warn_cash_on_cash_pct: 50.0,
            min_grm: 2.0,
            max_grm: 25.0,
            warn_expense_ratio_pct: 80.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanityReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Check each computed metric against the thresholds. Metrics that were not
/// computed are simply not judged.
pub fn check_metrics(metrics: &CalculatedMetrics, thresholds: &SanityThresholds) -> SanityReport {
    let mut report = SanityReport::default();

    if let Some(cap_rate) = metrics.cap_rate {
        if cap_rate < 0.0 {
            report.errors.push(format!(
                "Cap rate of {:.2}% is negative; NOI and purchase price inputs are inconsistent",
                cap_rate
            ));
        } else if cap_rate > thresholds.max_cap_rate_pct {
            report.warnings.push(format!(
                "Cap rate of {:.2}% is unusually high (above {:.0}%); verify NOI and price",
                cap_rate, thresholds.max_cap_rate_pct
            ));
        } else if cap_rate < thresholds.min_cap_rate_pct {
            report.warnings.push(format!(
                "Cap rate of {:.2}% is unusually low (below {:.0}%); verify NOI and price",
                cap_rate, thresholds.min_cap_rate_pct
            ));
        }
    }

    if let Some(dscr) = metrics.dscr {
        if dscr < thresholds.min_dscr {
            report.warnings.push(format!(
                "DSCR of {:.2} is below {:.2}; the property does not cover its debt service",
                dscr, thresholds.min_dscr
            ));
        }
    }

    if let Some(ltv) = metrics.ltv {
        if ltv > thresholds.max_ltv_pct {
            report.errors.push(format!(
                "LTV of {:.1}% exceeds {:.0}%; the loan is larger than the purchase price",
                ltv, thresholds.max_ltv_pct
            ));
        } else if ltv > thresholds.warn_ltv_pct {
            report.warnings.push(format!(
                "LTV of {:.1}% is above the typical {:.0}% financing ceiling",
                ltv, thresholds.warn_ltv_pct
            ));
        }
    }

    if let Some(coc) = metrics.cash_on_cash {
        if coc > thresholds.warn_cash_on_cash_pct {
            report.warnings.push(format!(
                "Cash-on-cash return of {:.1}% is implausibly high; verify cash flow and equity",
                coc
            ));
        }
    }

    if let Some(grm) = metrics.grm {
        if grm < thresholds.min_grm || grm > thresholds.max_grm {
            report.warnings.push(format!(
                "GRM of {:.1} falls outside the typical {:.0}-{:.0} range",
                grm, thresholds.min_grm, thresholds.max_grm
            ));
        }
    }

    if let Some(expense_ratio) = metrics.operating_expense_ratio {
        if expense_ratio > thresholds.warn_expense_ratio_pct {
            report.warnings.push(format!(
                "Operating expense ratio of {:.1}% is above {:.0}% of effective gross income",
                expense_ratio, thresholds.warn_expense_ratio_pct
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cap_rate_is_a_hard_error() {
        let metrics = CalculatedMetrics {
            cap_rate: Some(-3.0),
            ..Default::default()
        };
        let report = check_metrics(&metrics, &SanityThresholds::default());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("negative"));
    }

    #[test]
    fn high_cap_rate_is_only_a_warning() {
        let metrics = CalculatedMetrics {
            cap_rate: Some(24.0),
            ..Default::default()
        };
        let report = check_metrics(&metrics, &SanityThresholds::default());
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn ltv_over_100_is_a_hard_error() {
        let metrics = CalculatedMetrics {
            ltv: Some(110.0),
            ..Default::default()
        };
        let report = check_metrics(&metrics, &SanityThresholds::default());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("LTV"));
    }

    #[test]
    fn dscr_below_one_warns() {
        let metrics = CalculatedMetrics {
            dscr: Some(0.92),
            ..Default::default()
        };
        let report = check_metrics(&metrics, &SanityThresholds::default());
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn in_range_metrics_are_clean() {
        let metrics = CalculatedMetrics {
            cap_rate: Some(7.0),
            dscr: Some(1.35),
            ltv: Some(70.0),
            cash_on_cash: Some(9.0),
            grm: Some(10.0),
            operating_expense_ratio: Some(45.0),
            ..Default::default()
        };
        let report = check_metrics(&metrics, &SanityThresholds::default());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn thresholds_are_policy_not_hardcoded() {
        let strict = SanityThresholds {
            max_cap_rate_pct: 10.0,
            ..Default::default()
        };
        let metrics = CalculatedMetrics {
            cap_rate: Some(12.0),
            ..Default::default()
        };
        assert!(check_metrics(&metrics, &SanityThresholds::default())
            .warnings
            .is_empty());
        assert_eq!(check_metrics(&metrics, &strict).warnings.len(), 1);
    }
}
