use napi::Result as NapiResult;
use napi_derive::napi;

use credit_analysis_core::{AnalysisRequest, CreditScoringEngine, EngineConfig, FinancialInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine over `config_json`, or over the built-in tables when absent.
fn engine(config_json: Option<String>) -> NapiResult<CreditScoringEngine> {
    match config_json {
        Some(json) => {
            let config = EngineConfig::from_json_str(&json).map_err(to_napi_error)?;
            CreditScoringEngine::new(config).map_err(to_napi_error)
        }
        None => Ok(CreditScoringEngine::with_defaults()),
    }
}

// ---------------------------------------------------------------------------
// Credit analysis
// ---------------------------------------------------------------------------

/// Full pipeline. `input_json` is an analysis request
/// (`{ provenance?, inputs, narrative? }`).
#[napi]
pub fn analyze_financials(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let request: AnalysisRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine(config_json)?
        .analyze_request(request)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Ratios, grades and category averages. `input_json` is bare financial
/// inputs.
#[napi]
pub fn calculate_ratios(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let inputs: FinancialInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine(config_json)?.evaluate_indicators(&inputs);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_config() -> NapiResult<String> {
    serde_json::to_string(&EngineConfig::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Funding readiness
// ---------------------------------------------------------------------------

#[napi]
pub fn funding_readiness(input_json: String) -> NapiResult<String> {
    let input: credit_analysis_core::readiness::ReadinessInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_analysis_core::readiness::calculate_readiness(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}
