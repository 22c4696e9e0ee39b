use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io;
use std::str::FromStr;

use credit_analysis_core::{CreditAnalysisError, FinancialInputs, InputField};

use super::file::resolve_path;

/// Read financial inputs from a CSV file.
///
/// The header row names the fields ("Current Assets", "current_assets" and
/// "current-assets" are all accepted). Unknown columns are an error. Each
/// further row is one period; rows are summed per column, so twelve monthly
/// rows yield the annual total. Empty cells are absent, not zero.
pub fn read_csv_inputs(path: &str) -> Result<FinancialInputs, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let file = std::fs::File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let inputs = parse_inputs(file)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    tracing::debug!(
        path = %canonical.display(),
        fields = inputs.present_fields().len(),
        "csv inputs read"
    );
    Ok(inputs)
}

pub fn parse_inputs<R: io::Read>(reader: R) -> Result<FinancialInputs, Box<dyn std::error::Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns: Vec<InputField> = Vec::new();
    for header in rdr.headers()?.iter() {
        let field = InputField::from_str(header)?;
        if columns.contains(&field) {
            return Err(CreditAnalysisError::InvalidInput {
                field: field.to_string(),
                reason: "Column appears more than once.".into(),
            }
            .into());
        }
        columns.push(field);
    }

    let mut totals: BTreeMap<InputField, Decimal> = BTreeMap::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = idx + 2;
        for (field, cell) in columns.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            let value = Decimal::from_str(cell).map_err(|_| CreditAnalysisError::InvalidInput {
                field: field.to_string(),
                reason: format!("line {line}: '{cell}' is not a number."),
            })?;
            let total = totals.entry(*field).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(value)
                .ok_or_else(|| CreditAnalysisError::InvalidInput {
                    field: field.to_string(),
                    reason: format!("line {line}: sum overflows."),
                })?;
        }
    }

    Ok(totals
        .into_iter()
        .fold(FinancialInputs::default(), |inputs, (field, value)| {
            inputs.with(field, Some(value))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn parse(text: &str) -> Result<FinancialInputs, Box<dyn std::error::Error>> {
        parse_inputs(text.as_bytes())
    }

    #[test]
    fn test_single_row() {
        let inputs = parse("current_assets,current_liabilities,revenue\n200000,100000,500000\n").unwrap();
        assert_eq!(inputs.current_assets, Some(dec!(200000)));
        assert_eq!(inputs.current_liabilities, Some(dec!(100000)));
        assert_eq!(inputs.revenue, Some(dec!(500000)));
        assert_eq!(inputs.equity, None);
    }

    #[test]
    fn test_headers_are_case_and_space_insensitive() {
        let inputs = parse("Current Assets , NET-PROFIT\n10,2\n").unwrap();
        assert_eq!(inputs.current_assets, Some(dec!(10)));
        assert_eq!(inputs.net_profit, Some(dec!(2)));
    }

    #[test]
    fn test_rows_are_summed() {
        let inputs = parse("revenue,net_profit\n100.50,10\n200.25,-5\n300,\n").unwrap();
        assert_eq!(inputs.revenue, Some(dec!(600.75)));
        assert_eq!(inputs.net_profit, Some(dec!(5)));
    }

    #[test]
    fn test_empty_column_stays_absent() {
        let inputs = parse("revenue,cash\n100,\n200,\n").unwrap();
        assert_eq!(inputs.revenue, Some(dec!(300)));
        assert_eq!(inputs.cash, None);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = parse("revenue,turnover\n1,2\n").unwrap_err();
        assert!(err.to_string().contains("turnover"));
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let err = parse("revenue,Revenue\n1,2\n").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_non_numeric_cell_names_line() {
        let err = parse("revenue\n100\nabc\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
