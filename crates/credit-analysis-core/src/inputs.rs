//! Raw financial-statement fields consumed by the scoring engine.
//!
//! Every field is optional. An absent field stays `None` all the way through
//! the pipeline; it is never coerced to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CreditAnalysisError;
use crate::types::Money;
use crate::CreditAnalysisResult;

/// Version of the input field set. Bumped whenever a field is added,
/// removed or renamed, together with the threshold/weight configuration.
pub const FIELD_SET_VERSION: &str = "2";

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// Named financial-statement fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    CurrentAssets,
    CurrentLiabilities,
    Inventory,
    Cash,
    AccountsReceivable,
    TotalAssets,
    TotalLiabilities,
    Equity,
    TotalDebt,
    RetainedEarnings,
    Revenue,
    CostOfSales,
    GrossProfit,
    Ebit,
    Ebitda,
    NetProfit,
    InterestExpense,
    DebtService,
    Investment,
    SharesOutstanding,
    SharePrice,
}

impl InputField {
    pub const ALL: [InputField; 21] = [
        InputField::CurrentAssets,
        InputField::CurrentLiabilities,
        InputField::Inventory,
        InputField::Cash,
        InputField::AccountsReceivable,
        InputField::TotalAssets,
        InputField::TotalLiabilities,
        InputField::Equity,
        InputField::TotalDebt,
        InputField::RetainedEarnings,
        InputField::Revenue,
        InputField::CostOfSales,
        InputField::GrossProfit,
        InputField::Ebit,
        InputField::Ebitda,
        InputField::NetProfit,
        InputField::InterestExpense,
        InputField::DebtService,
        InputField::Investment,
        InputField::SharesOutstanding,
        InputField::SharePrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::Inventory => "inventory",
            Self::Cash => "cash",
            Self::AccountsReceivable => "accounts_receivable",
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::Equity => "equity",
            Self::TotalDebt => "total_debt",
            Self::RetainedEarnings => "retained_earnings",
            Self::Revenue => "revenue",
            Self::CostOfSales => "cost_of_sales",
            Self::GrossProfit => "gross_profit",
            Self::Ebit => "ebit",
            Self::Ebitda => "ebitda",
            Self::NetProfit => "net_profit",
            Self::InterestExpense => "interest_expense",
            Self::DebtService => "debt_service",
            Self::Investment => "investment",
            Self::SharesOutstanding => "shares_outstanding",
            Self::SharePrice => "share_price",
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InputField {
    type Err = CreditAnalysisError;

    /// Accepts the snake_case name in any case, with spaces or hyphens in
    /// place of underscores ("Current Assets", "current-assets").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        InputField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| CreditAnalysisError::InvalidInput {
                field: s.to_string(),
                reason: "Unknown financial field.".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// FinancialInputs
// ---------------------------------------------------------------------------

/// Raw financial-statement values for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialInputs {
    // Balance sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_liabilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_receivable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_earnings: Option<Money>,
    // Income statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_of_sales: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_expense: Option<Money>,
    // Debt service and investment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<Money>,
    // Market data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_outstanding: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_price: Option<Money>,
}

impl FinancialInputs {
    /// Value of a single field, `None` when absent.
    pub fn get(&self, field: InputField) -> Option<Decimal> {
        match field {
            InputField::CurrentAssets => self.current_assets,
            InputField::CurrentLiabilities => self.current_liabilities,
            InputField::Inventory => self.inventory,
            InputField::Cash => self.cash,
            InputField::AccountsReceivable => self.accounts_receivable,
            InputField::TotalAssets => self.total_assets,
            InputField::TotalLiabilities => self.total_liabilities,
            InputField::Equity => self.equity,
            InputField::TotalDebt => self.total_debt,
            InputField::RetainedEarnings => self.retained_earnings,
            InputField::Revenue => self.revenue,
            InputField::CostOfSales => self.cost_of_sales,
            InputField::GrossProfit => self.gross_profit,
            InputField::Ebit => self.ebit,
            InputField::Ebitda => self.ebitda,
            InputField::NetProfit => self.net_profit,
            InputField::InterestExpense => self.interest_expense,
            InputField::DebtService => self.debt_service,
            InputField::Investment => self.investment,
            InputField::SharesOutstanding => self.shares_outstanding,
            InputField::SharePrice => self.share_price,
        }
    }

    /// Builder-style setter, used by ingestion code that sees fields by name.
    pub fn with(mut self, field: InputField, value: Option<Decimal>) -> Self {
        let slot = match field {
            InputField::CurrentAssets => &mut self.current_assets,
            InputField::CurrentLiabilities => &mut self.current_liabilities,
            InputField::Inventory => &mut self.inventory,
            InputField::Cash => &mut self.cash,
            InputField::AccountsReceivable => &mut self.accounts_receivable,
            InputField::TotalAssets => &mut self.total_assets,
            InputField::TotalLiabilities => &mut self.total_liabilities,
            InputField::Equity => &mut self.equity,
            InputField::TotalDebt => &mut self.total_debt,
            InputField::RetainedEarnings => &mut self.retained_earnings,
            InputField::Revenue => &mut self.revenue,
            InputField::CostOfSales => &mut self.cost_of_sales,
            InputField::GrossProfit => &mut self.gross_profit,
            InputField::Ebit => &mut self.ebit,
            InputField::Ebitda => &mut self.ebitda,
            InputField::NetProfit => &mut self.net_profit,
            InputField::InterestExpense => &mut self.interest_expense,
            InputField::DebtService => &mut self.debt_service,
            InputField::Investment => &mut self.investment,
            InputField::SharesOutstanding => &mut self.shares_outstanding,
            InputField::SharePrice => &mut self.share_price,
        };
        *slot = value;
        self
    }

    /// Value of a field that the whole analysis depends on.
    pub fn require(&self, field: InputField) -> CreditAnalysisResult<Decimal> {
        self.get(field)
            .ok_or(CreditAnalysisError::MissingInput { field })
    }

    /// Fields carrying a value, in declaration order.
    pub fn present_fields(&self) -> Vec<InputField> {
        InputField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
