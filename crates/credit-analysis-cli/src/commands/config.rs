use serde_json::Value;
use std::path::Path;

use credit_analysis_core::{CreditScoringEngine, EngineConfig};

use crate::input;

/// Load and validate the scoring configuration, or fall back to the
/// built-in tables when no file is given.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = input::file::read_text(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let config = if is_yaml {
        EngineConfig::from_yaml_str(&contents)?
    } else {
        EngineConfig::from_json_str(&contents)?
    };
    tracing::info!(path, version = %config.version, "scoring configuration loaded");
    Ok(config)
}

pub fn load_engine(path: Option<&str>) -> Result<CreditScoringEngine, Box<dyn std::error::Error>> {
    Ok(CreditScoringEngine::new(load_config(path)?)?)
}

pub fn run_config(path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    Ok(serde_json::to_value(config)?)
}
