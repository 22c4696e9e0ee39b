use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_analysis_core::readiness::{self, ReadinessInput};

use crate::input;

/// Arguments for the funding-readiness score
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ReadinessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Annual profit
    #[arg(long)]
    pub profit: Option<Decimal>,

    /// Outstanding debt
    #[arg(long)]
    pub debt: Option<Decimal>,
}

pub fn run_readiness(args: ReadinessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let readiness_input: ReadinessInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        from_flags(&args)?
    };
    let result = readiness::calculate_readiness(&readiness_input);
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: &ReadinessArgs) -> Result<ReadinessInput, Box<dyn std::error::Error>> {
    Ok(ReadinessInput {
        revenue: args
            .revenue
            .ok_or("--revenue is required (or provide --input)")?,
        profit: args
            .profit
            .ok_or("--profit is required (or provide --input)")?,
        debt: args.debt.ok_or("--debt is required (or provide --input)")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        args: ReadinessArgs,
    }

    fn parse(argv: &[&str]) -> ReadinessArgs {
        Cli::try_parse_from(std::iter::once("readiness").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_flags_build_the_input() {
        let args = parse(&["--revenue", "1000000", "--profit", "250000", "--debt", "200000"]);
        let input = from_flags(&args).unwrap();
        assert_eq!(input.revenue, dec!(1_000_000));
        assert_eq!(input.profit, dec!(250_000));
        assert_eq!(input.debt, dec!(200_000));
    }

    #[test]
    fn test_missing_flag_names_the_flag() {
        let err = from_flags(&parse(&[])).unwrap_err().to_string();
        assert_eq!(err, "--revenue is required (or provide --input)");

        let err = from_flags(&parse(&["--revenue", "100", "--profit", "5"]))
            .unwrap_err()
            .to_string();
        assert_eq!(err, "--debt is required (or provide --input)");
    }

    #[test]
    fn test_input_file_is_scored() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "revenue": "300", "profit": "100", "debt": "0" }}"#).unwrap();
        let args = parse(&["--input", file.path().to_str().unwrap()]);

        let out = run_readiness(args).unwrap();
        let score: Decimal = out["score"].as_str().unwrap().parse().unwrap();
        assert_eq!(score, dec!(60));
        assert_eq!(out["insights"].as_array().unwrap().len(), 3);
    }
}
