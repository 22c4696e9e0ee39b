//! Named financial indicators and their grades.
//!
//! - [`ratios`] turns [`FinancialInputs`](crate::inputs::FinancialInputs)
//!   into raw indicator values.
//! - [`grading`] maps raw values onto the A-E grade scale.

pub mod grading;
pub mod ratios;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::InputField;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Fixed grouping of indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Liquidity,
    Leverage,
    Profitability,
    Solvency,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Liquidity,
        Category::Leverage,
        Category::Profitability,
        Category::Solvency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Liquidity => "Liquidity",
            Category::Leverage => "Leverage",
            Category::Profitability => "Profitability",
            Category::Solvency => "Solvency",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IndicatorKind
// ---------------------------------------------------------------------------

/// The fixed set of indicators computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    // Liquidity
    CurrentRatio,
    QuickRatio,
    CashRatio,
    WorkingCapitalToAssets,
    // Leverage
    DebtToEquityRatio,
    DebtRatio,
    EquityRatio,
    DebtToEbitda,
    // Profitability
    GrossProfitMargin,
    OperatingProfitMargin,
    NetProfitMargin,
    ReturnOnAssets,
    ReturnOnEquity,
    ReturnOnInvestment,
    EarningsPerShare,
    PriceToEarningsRatio,
    // Solvency
    InterestCoverageRatio,
    DebtServiceCoverageRatio,
    AssetTurnover,
    InventoryTurnover,
    ReceivablesTurnover,
    DaysSalesOutstanding,
    AltmanZScore,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 23] = [
        IndicatorKind::CurrentRatio,
        IndicatorKind::QuickRatio,
        IndicatorKind::CashRatio,
        IndicatorKind::WorkingCapitalToAssets,
        IndicatorKind::DebtToEquityRatio,
        IndicatorKind::DebtRatio,
        IndicatorKind::EquityRatio,
        IndicatorKind::DebtToEbitda,
        IndicatorKind::GrossProfitMargin,
        IndicatorKind::OperatingProfitMargin,
        IndicatorKind::NetProfitMargin,
        IndicatorKind::ReturnOnAssets,
        IndicatorKind::ReturnOnEquity,
        IndicatorKind::ReturnOnInvestment,
        IndicatorKind::EarningsPerShare,
        IndicatorKind::PriceToEarningsRatio,
        IndicatorKind::InterestCoverageRatio,
        IndicatorKind::DebtServiceCoverageRatio,
        IndicatorKind::AssetTurnover,
        IndicatorKind::InventoryTurnover,
        IndicatorKind::ReceivablesTurnover,
        IndicatorKind::DaysSalesOutstanding,
        IndicatorKind::AltmanZScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRatio => "current_ratio",
            Self::QuickRatio => "quick_ratio",
            Self::CashRatio => "cash_ratio",
            Self::WorkingCapitalToAssets => "working_capital_to_assets",
            Self::DebtToEquityRatio => "debt_to_equity_ratio",
            Self::DebtRatio => "debt_ratio",
            Self::EquityRatio => "equity_ratio",
            Self::DebtToEbitda => "debt_to_ebitda",
            Self::GrossProfitMargin => "gross_profit_margin",
            Self::OperatingProfitMargin => "operating_profit_margin",
            Self::NetProfitMargin => "net_profit_margin",
            Self::ReturnOnAssets => "return_on_assets",
            Self::ReturnOnEquity => "return_on_equity",
            Self::ReturnOnInvestment => "return_on_investment",
            Self::EarningsPerShare => "earnings_per_share",
            Self::PriceToEarningsRatio => "price_to_earnings_ratio",
            Self::InterestCoverageRatio => "interest_coverage_ratio",
            Self::DebtServiceCoverageRatio => "debt_service_coverage_ratio",
            Self::AssetTurnover => "asset_turnover",
            Self::InventoryTurnover => "inventory_turnover",
            Self::ReceivablesTurnover => "receivables_turnover",
            Self::DaysSalesOutstanding => "days_sales_outstanding",
            Self::AltmanZScore => "altman_z_score",
        }
    }

    /// Category the indicator belongs to in the default configuration.
    pub fn default_category(&self) -> Category {
        match self {
            Self::CurrentRatio
            | Self::QuickRatio
            | Self::CashRatio
            | Self::WorkingCapitalToAssets => Category::Liquidity,
            Self::DebtToEquityRatio | Self::DebtRatio | Self::EquityRatio | Self::DebtToEbitda => {
                Category::Leverage
            }
            Self::GrossProfitMargin
            | Self::OperatingProfitMargin
            | Self::NetProfitMargin
            | Self::ReturnOnAssets
            | Self::ReturnOnEquity
            | Self::ReturnOnInvestment
            | Self::EarningsPerShare
            | Self::PriceToEarningsRatio => Category::Profitability,
            Self::InterestCoverageRatio
            | Self::DebtServiceCoverageRatio
            | Self::AssetTurnover
            | Self::InventoryTurnover
            | Self::ReceivablesTurnover
            | Self::DaysSalesOutstanding
            | Self::AltmanZScore => Category::Solvency,
        }
    }

    /// Input fields the formula reads. The indicator is uncomputable when
    /// any of them is absent.
    pub fn required_fields(&self) -> &'static [InputField] {
        use InputField::*;
        match self {
            Self::CurrentRatio => &[CurrentAssets, CurrentLiabilities],
            Self::QuickRatio => &[CurrentAssets, Inventory, CurrentLiabilities],
            Self::CashRatio => &[Cash, CurrentLiabilities],
            Self::WorkingCapitalToAssets => &[CurrentAssets, CurrentLiabilities, TotalAssets],
            Self::DebtToEquityRatio => &[TotalLiabilities, Equity],
            Self::DebtRatio => &[TotalLiabilities, TotalAssets],
            Self::EquityRatio => &[Equity, TotalAssets],
            Self::DebtToEbitda => &[TotalDebt, Ebitda],
            Self::GrossProfitMargin => &[GrossProfit, Revenue],
            Self::OperatingProfitMargin => &[Ebit, Revenue],
            Self::NetProfitMargin => &[NetProfit, Revenue],
            Self::ReturnOnAssets => &[NetProfit, TotalAssets],
            Self::ReturnOnEquity => &[NetProfit, Equity],
            Self::ReturnOnInvestment => &[NetProfit, Investment],
            Self::EarningsPerShare => &[NetProfit, SharesOutstanding],
            Self::PriceToEarningsRatio => &[SharePrice, NetProfit, SharesOutstanding],
            Self::InterestCoverageRatio => &[Ebit, InterestExpense],
            Self::DebtServiceCoverageRatio => &[Ebitda, DebtService],
            Self::AssetTurnover => &[Revenue, TotalAssets],
            Self::InventoryTurnover => &[CostOfSales, Inventory],
            Self::ReceivablesTurnover => &[Revenue, AccountsReceivable],
            Self::DaysSalesOutstanding => &[Revenue, AccountsReceivable],
            Self::AltmanZScore => &[
                CurrentAssets,
                CurrentLiabilities,
                TotalAssets,
                TotalLiabilities,
                RetainedEarnings,
                Ebit,
                Equity,
                Revenue,
            ],
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Ordinal grade of one indicator. A is best (5), E is worst (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub fn score(&self) -> u8 {
        match self {
            Grade::A => 5,
            Grade::B => 4,
            Grade::C => 3,
            Grade::D => 2,
            Grade::E => 1,
        }
    }

    pub fn from_score(score: u8) -> Option<Grade> {
        match score {
            5 => Some(Grade::A),
            4 => Some(Grade::B),
            3 => Some(Grade::C),
            2 => Some(Grade::D),
            1 => Some(Grade::E),
            _ => None,
        }
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered by score: `Grade::A > Grade::E`.
impl Ord for Grade {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score().cmp(&other.score())
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// One computed and graded indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: IndicatorKind,
    /// `None` when an operand is missing or a divisor is zero.
    pub raw_value: Option<Decimal>,
    /// `None` exactly when `raw_value` is `None`.
    pub grade: Option<Grade>,
    pub category: Category,
}

impl Indicator {
    pub fn is_computable(&self) -> bool {
        self.raw_value.is_some()
    }
}
