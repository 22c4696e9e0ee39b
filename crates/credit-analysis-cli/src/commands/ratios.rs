use clap::Args;
use serde_json::Value;

use super::config::load_engine;
use super::fields::{read_request, FieldArgs, SourceArgs};

/// Arguments for ratio calculation and grading
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RatiosArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub fields: FieldArgs,
}

pub fn run_ratios(args: RatiosArgs, config: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = load_engine(config)?;
    let request = read_request(&args.source, &args.fields)?;
    let result = engine.evaluate_indicators(&request.inputs);
    Ok(serde_json::to_value(result)?)
}
