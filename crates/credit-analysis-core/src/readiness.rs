//! Quick funding-readiness score from three headline figures.
//!
//! A coarse 0-100 screen for applicants who only have revenue, profit and
//! debt to hand, ahead of the full ratio analysis:
//!
//! `score = profit/revenue * 60 + (1 - debt/revenue) * 30 + 10`, clamped to
//! [0, 100] and rounded to one decimal.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

const PROFITABILITY_WEIGHT: Decimal = dec!(60);
const DEBT_WEIGHT: Decimal = dec!(30);
const BASELINE: Decimal = dec!(10);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessInput {
    pub revenue: Money,
    pub profit: Money,
    pub debt: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessOutput {
    /// 0-100, one decimal place.
    pub score: Decimal,
    pub profit_margin: Option<Rate>,
    pub debt_to_revenue: Option<Rate>,
    pub insights: Vec<String>,
}

/// Score lending readiness. Never fails: a non-positive revenue, or figures
/// whose ratios overflow the decimal range, score 0.
pub fn calculate_readiness(input: &ReadinessInput) -> ReadinessOutput {
    if input.revenue <= Decimal::ZERO {
        return unscored("Revenue must be positive for a valid readiness score.");
    }

    let Some((profit_margin, debt_to_revenue, raw)) = raw_score(input) else {
        tracing::warn!(revenue = %input.revenue, "readiness figures out of range");
        return unscored("Figures are out of range for a readiness score.");
    };

    let score = raw
        .clamp(Decimal::ZERO, dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    let mut insights = Vec::with_capacity(3);

    if profit_margin > dec!(0.20) {
        insights.push("Strong profitability (profit margin above 20%).".into());
    } else if profit_margin > dec!(0.05) {
        insights.push("Moderate profitability.".into());
    } else {
        insights.push("Low or no profitability; consider margin improvements.".into());
    }

    if debt_to_revenue > Decimal::ONE {
        insights.push("Debt exceeds annual revenue; high leverage risk.".into());
    } else if debt_to_revenue > dec!(0.5) {
        insights.push("Elevated debt relative to revenue; refinancing recommended.".into());
    } else {
        insights.push("Debt level appears manageable.".into());
    }

    if score > dec!(75) {
        insights.push("Good candidate for external funding.".into());
    } else if score > dec!(50) {
        insights.push("May be eligible for small loans with some conditions.".into());
    } else {
        insights.push("Not ready for lending; improve cash flow or reduce debt.".into());
    }

    ReadinessOutput {
        score,
        profit_margin: Some(profit_margin),
        debt_to_revenue: Some(debt_to_revenue),
        insights,
    }
}

fn unscored(reason: &str) -> ReadinessOutput {
    ReadinessOutput {
        score: Decimal::ZERO,
        profit_margin: None,
        debt_to_revenue: None,
        insights: vec![reason.to_string()],
    }
}

/// Margin, leverage and the unclamped score; `None` on overflow.
fn raw_score(input: &ReadinessInput) -> Option<(Rate, Rate, Decimal)> {
    let profit_margin = input.profit.checked_div(input.revenue)?;
    let debt_to_revenue = input.debt.checked_div(input.revenue)?;

    let raw = profit_margin
        .checked_mul(PROFITABILITY_WEIGHT)?
        .checked_add(Decimal::ONE.checked_sub(debt_to_revenue)?.checked_mul(DEBT_WEIGHT)?)?
        .checked_add(BASELINE)?;
    Some((profit_margin, debt_to_revenue, raw))
}
