//! Ratio calculator.
//!
//! Pure functions from [`FinancialInputs`] to raw indicator values. A missing
//! operand or a zero divisor yields `None` for that indicator only; other
//! indicators are computed independently. Values are never rounded here.
//!
//! All arithmetic uses `rust_decimal::Decimal` checked operations, so
//! overflow also resolves to `None` instead of panicking.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::IndicatorKind;
use crate::inputs::FinancialInputs;

/// Raw value per indicator, `None` when uncomputable.
pub type RatioValues = BTreeMap<IndicatorKind, Option<Decimal>>;

// Altman Z-score coefficients (original public-manufacturer model, with book
// equity standing in for market value of equity).
const Z_WORKING_CAPITAL: Decimal = dec!(1.2);
const Z_RETAINED_EARNINGS: Decimal = dec!(1.4);
const Z_EBIT: Decimal = dec!(3.3);
const Z_EQUITY_TO_LIABILITIES: Decimal = dec!(0.6);
const Z_SALES: Decimal = dec!(1.0);

const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every indicator from the supplied inputs.
pub fn calculate_ratios(inputs: &FinancialInputs) -> RatioValues {
    IndicatorKind::ALL
        .iter()
        .map(|kind| (*kind, calculate_ratio(*kind, inputs)))
        .collect()
}

/// Compute a single indicator.
pub fn calculate_ratio(kind: IndicatorKind, inputs: &FinancialInputs) -> Option<Decimal> {
    let i = inputs;
    match kind {
        // -- Liquidity --------------------------------------------------------
        IndicatorKind::CurrentRatio => safe_divide(i.current_assets, i.current_liabilities),
        IndicatorKind::QuickRatio => safe_divide(
            safe_sub(i.current_assets, i.inventory),
            i.current_liabilities,
        ),
        IndicatorKind::CashRatio => safe_divide(i.cash, i.current_liabilities),
        IndicatorKind::WorkingCapitalToAssets => safe_divide(
            safe_sub(i.current_assets, i.current_liabilities),
            i.total_assets,
        ),

        // -- Leverage ---------------------------------------------------------
        IndicatorKind::DebtToEquityRatio => safe_divide(i.total_liabilities, i.equity),
        IndicatorKind::DebtRatio => safe_divide(i.total_liabilities, i.total_assets),
        IndicatorKind::EquityRatio => safe_divide(i.equity, i.total_assets),
        IndicatorKind::DebtToEbitda => safe_divide(i.total_debt, i.ebitda),

        // -- Profitability ----------------------------------------------------
        IndicatorKind::GrossProfitMargin => safe_divide(i.gross_profit, i.revenue),
        IndicatorKind::OperatingProfitMargin => safe_divide(i.ebit, i.revenue),
        IndicatorKind::NetProfitMargin => safe_divide(i.net_profit, i.revenue),
        IndicatorKind::ReturnOnAssets => safe_divide(i.net_profit, i.total_assets),
        IndicatorKind::ReturnOnEquity => safe_divide(i.net_profit, i.equity),
        IndicatorKind::ReturnOnInvestment => safe_divide(i.net_profit, i.investment),
        IndicatorKind::EarningsPerShare => safe_divide(i.net_profit, i.shares_outstanding),
        IndicatorKind::PriceToEarningsRatio => safe_divide(
            i.share_price,
            safe_divide(i.net_profit, i.shares_outstanding),
        ),

        // -- Solvency ---------------------------------------------------------
        IndicatorKind::InterestCoverageRatio => safe_divide(i.ebit, i.interest_expense),
        IndicatorKind::DebtServiceCoverageRatio => safe_divide(i.ebitda, i.debt_service),
        IndicatorKind::AssetTurnover => safe_divide(i.revenue, i.total_assets),
        IndicatorKind::InventoryTurnover => safe_divide(i.cost_of_sales, i.inventory),
        IndicatorKind::ReceivablesTurnover => safe_divide(i.revenue, i.accounts_receivable),
        IndicatorKind::DaysSalesOutstanding => safe_divide(
            Some(DAYS_PER_YEAR),
            safe_divide(i.revenue, i.accounts_receivable),
        ),
        IndicatorKind::AltmanZScore => altman_z_score(i),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn safe_divide(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let (n, d) = (numerator?, denominator?);
    if d.is_zero() {
        return None;
    }
    n.checked_div(d)
}

fn safe_sub(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    a?.checked_sub(b?)
}

/// Z = 1.2·WC/TA + 1.4·RE/TA + 3.3·EBIT/TA + 0.6·Equity/TL + 1.0·Sales/TA
fn altman_z_score(i: &FinancialInputs) -> Option<Decimal> {
    let working_capital = safe_sub(i.current_assets, i.current_liabilities);
    let terms = [
        (Z_WORKING_CAPITAL, safe_divide(working_capital, i.total_assets)?),
        (Z_RETAINED_EARNINGS, safe_divide(i.retained_earnings, i.total_assets)?),
        (Z_EBIT, safe_divide(i.ebit, i.total_assets)?),
        (
            Z_EQUITY_TO_LIABILITIES,
            safe_divide(i.equity, i.total_liabilities)?,
        ),
        (Z_SALES, safe_divide(i.revenue, i.total_assets)?),
    ];
    terms.iter().try_fold(Decimal::ZERO, |acc, (coef, ratio)| {
        acc.checked_add(coef.checked_mul(*ratio)?)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputField;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn full_inputs() -> FinancialInputs {
        FinancialInputs {
            current_assets: Some(dec!(300_000)),
            current_liabilities: Some(dec!(150_000)),
            inventory: Some(dec!(60_000)),
            cash: Some(dec!(45_000)),
            accounts_receivable: Some(dec!(100_000)),
            total_assets: Some(dec!(1_000_000)),
            total_liabilities: Some(dec!(400_000)),
            equity: Some(dec!(600_000)),
            total_debt: Some(dec!(250_000)),
            retained_earnings: Some(dec!(300_000)),
            revenue: Some(dec!(1_200_000)),
            cost_of_sales: Some(dec!(720_000)),
            gross_profit: Some(dec!(480_000)),
            ebit: Some(dec!(180_000)),
            ebitda: Some(dec!(220_000)),
            net_profit: Some(dec!(120_000)),
            interest_expense: Some(dec!(20_000)),
            debt_service: Some(dec!(110_000)),
            investment: Some(dec!(800_000)),
            shares_outstanding: Some(dec!(100_000)),
            share_price: Some(dec!(15)),
        }
    }

    #[test]
    fn test_liquidity_ratios() {
        let r = calculate_ratios(&full_inputs());
        assert_eq!(r[&IndicatorKind::CurrentRatio], Some(dec!(2)));
        // (300k - 60k) / 150k = 1.6
        assert_eq!(r[&IndicatorKind::QuickRatio], Some(dec!(1.6)));
        assert_eq!(r[&IndicatorKind::CashRatio], Some(dec!(0.3)));
        // (300k - 150k) / 1M = 0.15
        assert_eq!(r[&IndicatorKind::WorkingCapitalToAssets], Some(dec!(0.15)));
    }

    #[test]
    fn test_leverage_ratios() {
        let r = calculate_ratios(&full_inputs());
        let expected_de = dec!(400_000) / dec!(600_000);
        assert_eq!(r[&IndicatorKind::DebtToEquityRatio], Some(expected_de));
        assert_eq!(r[&IndicatorKind::DebtRatio], Some(dec!(0.4)));
        assert_eq!(r[&IndicatorKind::EquityRatio], Some(dec!(0.6)));
        let expected_dte = dec!(250_000) / dec!(220_000);
        assert_eq!(r[&IndicatorKind::DebtToEbitda], Some(expected_dte));
    }

    #[test]
    fn test_profitability_ratios_are_decimals_not_percentages() {
        let r = calculate_ratios(&full_inputs());
        assert_eq!(r[&IndicatorKind::GrossProfitMargin], Some(dec!(0.4)));
        assert_eq!(r[&IndicatorKind::OperatingProfitMargin], Some(dec!(0.15)));
        assert_eq!(r[&IndicatorKind::NetProfitMargin], Some(dec!(0.1)));
        assert_eq!(r[&IndicatorKind::ReturnOnAssets], Some(dec!(0.12)));
        assert_eq!(r[&IndicatorKind::ReturnOnEquity], Some(dec!(0.2)));
        assert_eq!(r[&IndicatorKind::ReturnOnInvestment], Some(dec!(0.15)));
    }

    #[test]
    fn test_solvency_ratios() {
        let r = calculate_ratios(&full_inputs());
        assert_eq!(r[&IndicatorKind::InterestCoverageRatio], Some(dec!(9)));
        assert_eq!(r[&IndicatorKind::DebtServiceCoverageRatio], Some(dec!(2)));
        assert_eq!(r[&IndicatorKind::AssetTurnover], Some(dec!(1.2)));
        assert_eq!(r[&IndicatorKind::InventoryTurnover], Some(dec!(12)));
        assert_eq!(r[&IndicatorKind::ReceivablesTurnover], Some(dec!(12)));
    }

    #[test]
    fn test_per_share_ratios() {
        let r = calculate_ratios(&full_inputs());
        // 120k / 100k shares = 1.2 per share; 15 / 1.2 = 12.5
        assert_eq!(r[&IndicatorKind::EarningsPerShare], Some(dec!(1.2)));
        assert_eq!(r[&IndicatorKind::PriceToEarningsRatio], Some(dec!(12.5)));
    }

    #[test]
    fn test_zero_earnings_leaves_price_to_earnings_uncomputable() {
        let inputs = full_inputs().with(InputField::NetProfit, Some(Decimal::ZERO));
        let r = calculate_ratios(&inputs);
        assert_eq!(r[&IndicatorKind::EarningsPerShare], Some(Decimal::ZERO));
        assert_eq!(r[&IndicatorKind::PriceToEarningsRatio], None);
    }

    #[test]
    fn test_days_sales_outstanding() {
        let r = calculate_ratios(&full_inputs());
        // receivables turnover 12 -> 365 / 12 days
        assert_eq!(r[&IndicatorKind::DaysSalesOutstanding], Some(dec!(365) / dec!(12)));

        let no_sales = full_inputs().with(InputField::Revenue, Some(Decimal::ZERO));
        assert_eq!(
            calculate_ratio(IndicatorKind::DaysSalesOutstanding, &no_sales),
            None
        );
    }

    #[test]
    fn test_altman_z_score() {
        // 1.2*0.15 + 1.4*0.3 + 3.3*0.18 + 0.6*1.5 + 1.0*1.2
        // = 0.18 + 0.42 + 0.594 + 0.9 + 1.2 = 3.294
        let z = calculate_ratio(IndicatorKind::AltmanZScore, &full_inputs()).unwrap();
        assert_eq!(z, dec!(3.294));
    }

    #[test]
    fn test_zero_divisor_yields_none() {
        let mut inputs = full_inputs();
        inputs.current_liabilities = Some(Decimal::ZERO);
        let r = calculate_ratios(&inputs);
        assert_eq!(r[&IndicatorKind::CurrentRatio], None);
        assert_eq!(r[&IndicatorKind::QuickRatio], None);
        assert_eq!(r[&IndicatorKind::CashRatio], None);
        // Working capital still computes: (300k - 0) / 1M
        assert_eq!(r[&IndicatorKind::WorkingCapitalToAssets], Some(dec!(0.3)));
    }

    #[test]
    fn test_missing_operand_only_affects_dependent_indicators() {
        let inputs = full_inputs().with(InputField::Inventory, None);
        let r = calculate_ratios(&inputs);
        assert_eq!(r[&IndicatorKind::QuickRatio], None);
        assert_eq!(r[&IndicatorKind::InventoryTurnover], None);
        let computable = r.values().filter(|v| v.is_some()).count();
        assert_eq!(computable, IndicatorKind::ALL.len() - 2);
    }

    #[test]
    fn test_required_fields_match_formulas() {
        // Removing any declared field makes the indicator uncomputable.
        for kind in IndicatorKind::ALL {
            for field in kind.required_fields() {
                let inputs = full_inputs().with(*field, None);
                assert_eq!(
                    calculate_ratio(kind, &inputs),
                    None,
                    "{kind} should need {field}"
                );
            }
        }
    }

    #[test]
    fn test_negative_values_compute_without_error() {
        let mut inputs = full_inputs();
        inputs.equity = Some(dec!(-100_000));
        let r = calculate_ratios(&inputs);
        assert_eq!(r[&IndicatorKind::DebtToEquityRatio], Some(dec!(-4)));
        assert_eq!(r[&IndicatorKind::ReturnOnEquity], Some(dec!(-1.2)));
    }

    #[test]
    fn test_empty_inputs_yield_all_none() {
        let r = calculate_ratios(&FinancialInputs::default());
        assert_eq!(r.len(), IndicatorKind::ALL.len());
        assert!(r.values().all(|v| v.is_none()));
    }
}
