use clap::Args;
use serde_json::Value;

use credit_analysis_core::AnalysisRequest;

use super::config::load_engine;
use super::fields::{read_request, FieldArgs, SourceArgs};

/// Arguments for a full credit analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Company name recorded in the report
    #[arg(long)]
    pub company_name: Option<String>,

    /// Fiscal year recorded in the report
    #[arg(long)]
    pub fiscal_year: Option<String>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

pub fn run_analyze(
    args: AnalyzeArgs,
    config: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = load_engine(config)?;
    let mut request = read_request(&args.source, &args.fields)?;
    apply_provenance_overrides(&mut request, args.company_name, args.fiscal_year);

    let result = engine.analyze_request(request)?;
    Ok(serde_json::to_value(result)?)
}

/// Flags win over whatever the input document recorded.
fn apply_provenance_overrides(
    request: &mut AnalysisRequest,
    company_name: Option<String>,
    fiscal_year: Option<String>,
) {
    if company_name.is_some() {
        request.provenance.company_name = company_name;
    }
    if fiscal_year.is_some() {
        request.provenance.fiscal_year = fiscal_year;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        args: AnalyzeArgs,
    }

    fn parse(argv: &[&str]) -> AnalyzeArgs {
        Cli::try_parse_from(std::iter::once("analyze").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    fn request_file(body: &Value) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    fn small_business() -> Value {
        serde_json::json!({
            "provenance": { "company_name": "Acme BV", "fiscal_year": "2023" },
            "inputs": {
                "current_assets": 200000,
                "current_liabilities": 100000,
                "net_profit": 50000,
                "revenue": 500000,
                "total_liabilities": 150000,
                "equity": 250000
            }
        })
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut request = AnalysisRequest::default();
        request.provenance.company_name = Some("Acme BV".into());
        request.provenance.fiscal_year = Some("2023".into());

        apply_provenance_overrides(&mut request, None, Some("2024".into()));
        assert_eq!(request.provenance.company_name.as_deref(), Some("Acme BV"));
        assert_eq!(request.provenance.fiscal_year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_analyze_input_file_with_override() {
        let file = request_file(&small_business());
        let path = file.path().to_str().unwrap();
        let args = parse(&["--input", path, "--company-name", "Acme Holding"]);

        let out = run_analyze(args, None).unwrap();
        let report = &out["result"];
        assert_eq!(report["provenance"]["company_name"], "Acme Holding");
        assert_eq!(report["provenance"]["fiscal_year"], "2023");
        assert_eq!(report["provenance"]["source"]["kind"], "document");
        assert_eq!(report["status"], "complete");
        assert_eq!(report["classification"]["risk_category"], "Good");
    }

    #[test]
    fn test_unscorable_input_still_produces_a_report() {
        let file = request_file(&serde_json::json!({
            "revenue": 500000, "cash": 10000, "equity": 100000
        }));
        let args = parse(&["--input", file.path().to_str().unwrap()]);

        let out = run_analyze(args, None).unwrap();
        assert_eq!(out["result"]["status"], "insufficient_data");
        assert!(out["result"]["classification"].is_null());
    }

    #[test]
    fn test_missing_revenue_is_an_error() {
        let file = request_file(&serde_json::json!({ "cash": 10000 }));
        let args = parse(&["--input", file.path().to_str().unwrap()]);
        let err = run_analyze(args, None).unwrap_err().to_string();
        assert!(err.contains("revenue"), "{err}");
    }
}
