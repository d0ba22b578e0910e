// src/services/metrics.rs
//
// Pure metric formulas. Every function takes the property record and returns
// Some(value) only when the inputs it needs are present and the result is
// finite. Missing data is an ordinary outcome here, not an error; values are
// rounded at presentation time only.
use crate::models::PropertyData;

/// Guarded division: `None` on a zero denominator or a non-finite result.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Cap Rate = NOI / purchase price * 100
pub fn cap_rate(data: &PropertyData) -> Option<f64> {
    let noi = data.current_noi?;
    let price = data.purchase_price?;
    ratio(noi, price).map(|r| r * 100.0)
}

/// Total equity invested. Falls back to down payment plus closing costs when
/// the form did not capture it directly.
pub fn total_investment(data: &PropertyData) -> Option<f64> {
    if let Some(explicit) = data.total_investment {
        return Some(explicit);
    }
    let price = data.purchase_price?;
    let loan = data.loan_amount.unwrap_or(0.0);
    let closing = data.closing_costs.unwrap_or(0.0);
    let equity = price - loan + closing;
    (equity.is_finite() && equity > 0.0).then_some(equity)
}

/// Cash-on-Cash = annual cash flow / total investment * 100
pub fn cash_on_cash(data: &PropertyData) -> Option<f64> {
    let cash_flow = data.annual_cash_flow?;
    let investment = total_investment(data)?;
    ratio(cash_flow, investment).map(|r| r * 100.0)
}

/// Annual payment on a fully amortizing loan with monthly compounding.
/// A zero-rate loan amortizes linearly.
pub fn amortized_annual_debt_service(
    loan_amount: f64,
    annual_rate_pct: f64,
    term_years: f64,
) -> Option<f64> {
    if loan_amount <= 0.0 || term_years <= 0.0 || annual_rate_pct < 0.0 {
        return None;
    }
    let months = term_years * 12.0;
    if annual_rate_pct == 0.0 {
        return Some(loan_amount / term_years);
    }
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let factor = (1.0 + monthly_rate).powf(months);
    let monthly_payment = loan_amount * monthly_rate * factor / (factor - 1.0);
    let annual = monthly_payment * 12.0;
    annual.is_finite().then_some(annual)
}

/// Debt service from the loan fields on the record.
pub fn annual_debt_service(data: &PropertyData) -> Option<f64> {
    amortized_annual_debt_service(data.loan_amount?, data.interest_rate?, data.loan_term?)
}

/// DSCR = NOI / annual debt service. Zero debt service yields `None`,
/// never infinity.
pub fn dscr(data: &PropertyData) -> Option<f64> {
    let noi = data.current_noi?;
    let debt_service = annual_debt_service(data)?;
    ratio(noi, debt_service)
}

/// LTV = loan amount / purchase price * 100. Values above 100 are computed
/// here and flagged by the sanity layer, not silently clamped.
pub fn ltv(data: &PropertyData) -> Option<f64> {
    let loan = data.loan_amount?;
    let price = data.purchase_price?;
    ratio(loan, price).map(|r| r * 100.0)
}

/// GRM = purchase price / gross annual income
pub fn grm(data: &PropertyData) -> Option<f64> {
    let price = data.purchase_price?;
    let income = data.gross_annual_income?;
    ratio(price, income)
}

pub fn price_per_square_foot(data: &PropertyData) -> Option<f64> {
    let price = data.purchase_price?;
    let sq_ft = data.square_footage?;
    ratio(price, sq_ft)
}

pub fn price_per_unit(data: &PropertyData) -> Option<f64> {
    let price = data.purchase_price?;
    let units = data.unit_count?;
    ratio(price, units as f64)
}

/// Operating expense ratio = expenses / effective gross income * 100.
/// Effective gross income nets out the stated vacancy rate when present.
pub fn operating_expense_ratio(data: &PropertyData) -> Option<f64> {
    let expenses = data.operating_expenses?;
    let gross = data.gross_annual_income?;
    let occupancy = 1.0 - data.vacancy_rate.unwrap_or(0.0) / 100.0;
    ratio(expenses, gross * occupancy).map(|r| r * 100.0)
}

/// Break-even occupancy = (expenses + debt service) / gross income * 100
pub fn break_even_occupancy(data: &PropertyData) -> Option<f64> {
    let expenses = data.operating_expenses?;
    let gross = data.gross_annual_income?;
    let debt_service = annual_debt_service(data).unwrap_or(0.0);
    ratio(expenses + debt_service, gross).map(|r| r * 100.0)
}

/// Remaining principal after `years` of payments on the record's loan.
fn loan_balance_after(data: &PropertyData, years: f64) -> Option<f64> {
    let principal = data.loan_amount?;
    let rate_pct = data.interest_rate?;
    let term = data.loan_term?;
    if years >= term {
        return Some(0.0);
    }
    let months = years * 12.0;
    if rate_pct == 0.0 {
        return Some(principal - principal / term * years);
    }
    let monthly_rate = rate_pct / 100.0 / 12.0;
    let monthly_payment = amortized_annual_debt_service(principal, rate_pct, term)? / 12.0;
    let grown = (1.0 + monthly_rate).powf(months);
    let balance = principal * grown - monthly_payment * (grown - 1.0) / monthly_rate;
    balance.is_finite().then_some(balance.max(0.0))
}

/// Hold-period cash-flow vector: equity out at time zero, grown annual cash
/// flows, and reversion (exit-cap sale less remaining loan balance) in the
/// final year. The projection is the shared input to IRR and the equity
/// multiple.
fn hold_period_cash_flows(data: &PropertyData) -> Option<Vec<f64>> {
    let hold_years = data.projected_hold_years?;
    if hold_years == 0 {
        return None;
    }
    let initial_equity = total_investment(data)?;
    let base_cash_flow = data.annual_cash_flow?;
    let growth = data.annual_cash_flow_growth.unwrap_or(0.0) / 100.0;
    let exit_cap = data.exit_cap_rate?;
    let noi = data.current_noi?;
    if exit_cap <= 0.0 {
        return None;
    }

    let mut flows = Vec::with_capacity(hold_years as usize + 1);
    flows.push(-initial_equity);
    for year in 1..=hold_years {
        flows.push(base_cash_flow * (1.0 + growth).powi(year as i32 - 1));
    }

    let exit_noi = noi * (1.0 + growth).powi(hold_years as i32);
    let sale_price = exit_noi / (exit_cap / 100.0);
    let balance = match data.loan_amount {
        Some(_) => loan_balance_after(data, hold_years as f64)?,
        None => 0.0,
    };
    *flows.last_mut().unwrap() += sale_price - balance;

    flows.iter().all(|f| f.is_finite()).then_some(flows)
}

/// Equity multiple = total distributions over the hold / initial equity
pub fn equity_multiple(data: &PropertyData) -> Option<f64> {
    let flows = hold_period_cash_flows(data)?;
    let invested = -flows[0];
    let distributed: f64 = flows[1..].iter().sum();
    ratio(distributed, invested)
}

fn npv(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(t, flow)| flow / (1.0 + rate).powi(t as i32))
        .sum()
}

/// IRR of the hold-period projection, solved by bisection. `None` when the
/// flow vector has no sign change (no root exists to find).
pub fn irr(data: &PropertyData) -> Option<f64> {
    let flows = hold_period_cash_flows(data)?;
    let has_negative = flows.iter().any(|f| *f < 0.0);
    let has_positive = flows.iter().any(|f| *f > 0.0);
    if !has_negative || !has_positive {
        return None;
    }

    let mut low = -0.99;
    let mut high = 10.0;
    let mut npv_low = npv(low, &flows);
    let npv_high = npv(high, &flows);
    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..200 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(mid, &flows);
        if npv_mid.abs() < 1e-7 || (high - low) / 2.0 < 1e-9 {
            return Some(mid * 100.0);
        }
        if npv_low * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }
    Some((low + high) / 2.0 * 100.0)
}
