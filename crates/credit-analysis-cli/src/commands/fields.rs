use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

use credit_analysis_core::report::InputSource;
use credit_analysis_core::{AnalysisRequest, FinancialInputs};

use crate::input;

/// Where the figures are read from. Checked in order: `--input`, `--csv`,
/// piped stdin, then the individual field flags.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to JSON input file: an analysis request or bare financial inputs
    #[arg(long, conflicts_with = "csv")]
    pub input: Option<String>,

    /// Path to CSV file with one column per field; rows are summed
    #[arg(long)]
    pub csv: Option<String>,
}

/// One flag per financial-statement field
#[derive(Args)]
pub struct FieldArgs {
    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Inventory
    #[arg(long)]
    pub inventory: Option<Decimal>,

    /// Cash and equivalents
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Accounts receivable
    #[arg(long, alias = "receivables")]
    pub accounts_receivable: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Total interest-bearing debt
    #[arg(long)]
    pub total_debt: Option<Decimal>,

    /// Retained earnings
    #[arg(long)]
    pub retained_earnings: Option<Decimal>,

    /// Revenue (net sales)
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Cost of sales
    #[arg(long, alias = "cogs")]
    pub cost_of_sales: Option<Decimal>,

    /// Gross profit
    #[arg(long)]
    pub gross_profit: Option<Decimal>,

    /// EBIT (operating profit)
    #[arg(long)]
    pub ebit: Option<Decimal>,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Option<Decimal>,

    /// Net profit
    #[arg(long)]
    pub net_profit: Option<Decimal>,

    /// Interest expense
    #[arg(long)]
    pub interest_expense: Option<Decimal>,

    /// Scheduled principal plus interest
    #[arg(long)]
    pub debt_service: Option<Decimal>,

    /// Invested capital
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Shares outstanding
    #[arg(long, alias = "shares")]
    pub shares_outstanding: Option<Decimal>,

    /// Market price per share
    #[arg(long)]
    pub share_price: Option<Decimal>,
}

impl FieldArgs {
    pub fn to_inputs(&self) -> FinancialInputs {
        FinancialInputs {
            current_assets: self.current_assets,
            current_liabilities: self.current_liabilities,
            inventory: self.inventory,
            cash: self.cash,
            accounts_receivable: self.accounts_receivable,
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            equity: self.equity,
            total_debt: self.total_debt,
            retained_earnings: self.retained_earnings,
            revenue: self.revenue,
            cost_of_sales: self.cost_of_sales,
            gross_profit: self.gross_profit,
            ebit: self.ebit,
            ebitda: self.ebitda,
            net_profit: self.net_profit,
            interest_expense: self.interest_expense,
            debt_service: self.debt_service,
            investment: self.investment,
            shares_outstanding: self.shares_outstanding,
            share_price: self.share_price,
        }
    }
}

/// Build an analysis request from whichever source was supplied.
pub fn read_request(
    source: &SourceArgs,
    fields: &FieldArgs,
) -> Result<AnalysisRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = source.input {
        let value = input::file::read_json_value(path)?;
        let mut request = request_from_value(value)?;
        if request.provenance.source == InputSource::Manual {
            request.provenance.source = InputSource::Document {
                file_name: file_name(path),
            };
        }
        Ok(request)
    } else if let Some(ref path) = source.csv {
        let inputs = input::csv_in::read_csv_inputs(path)?;
        let mut request = AnalysisRequest {
            inputs,
            ..Default::default()
        };
        request.provenance.source = InputSource::Csv {
            file_name: file_name(path),
        };
        Ok(request)
    } else if let Some(data) = input::stdin::read_stdin()? {
        request_from_value(data)
    } else {
        Ok(AnalysisRequest {
            inputs: fields.to_inputs(),
            ..Default::default()
        })
    }
}

/// A document with an `inputs` key is a full request; anything else is
/// read as bare financial inputs.
fn request_from_value(value: Value) -> Result<AnalysisRequest, Box<dyn std::error::Error>> {
    if value.get("inputs").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(AnalysisRequest {
            inputs: serde_json::from_value(value)?,
            ..Default::default()
        })
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
