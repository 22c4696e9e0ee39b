//! The scoring pipeline.
//!
//! inputs -> ratios -> grades -> category averages -> classification ->
//! report. Each stage consumes the complete output of the one before it.
//! The engine holds nothing but its validated configuration, so one value
//! can serve concurrent requests by shared reference.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::indicators::grading::grade_all;
use crate::indicators::ratios::calculate_ratios;
use crate::indicators::Indicator;
use crate::inputs::{FinancialInputs, FIELD_SET_VERSION};
use crate::report::{assemble_report, Narrative, Provenance, Report};
use crate::scoring::categories::{aggregate_categories, CategoryScore};
use crate::scoring::classification::{classify, ClassificationResult};
use crate::scoring::BAND_COMPARISON_DP;
use crate::types::{with_metadata, ComputationOutput};
use crate::CreditAnalysisResult;

const METHODOLOGY: &str = "Financial ratio grading (A-E) with weighted category credit scoring";

// ---------------------------------------------------------------------------
// Request / output types
// ---------------------------------------------------------------------------

/// A complete analysis request as submitted by a front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub provenance: Provenance,
    pub inputs: FinancialInputs,
    #[serde(default)]
    pub narrative: Option<Narrative>,
}

/// Indicators and category scores without a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub indicators: Vec<Indicator>,
    pub categories: Vec<CategoryScore>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreditScoringEngine {
    config: EngineConfig,
}

impl CreditScoringEngine {
    /// Validate the configuration and build an engine around it.
    pub fn new(config: EngineConfig) -> CreditAnalysisResult<Self> {
        config.validate()?;
        tracing::debug!(version = %config.version, "scoring configuration validated");
        Ok(Self { config })
    }

    /// Engine over the built-in tables.
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one request.
    pub fn analyze_request(
        &self,
        request: AnalysisRequest,
    ) -> CreditAnalysisResult<ComputationOutput<Report>> {
        self.analyze(&request.inputs, request.provenance, request.narrative)
    }

    /// Run the full pipeline.
    ///
    /// The only hard failure is an absent required field. Uncomputable
    /// indicators, empty categories and a missing classification are
    /// reported as gaps in the report and as warnings.
    pub fn analyze(
        &self,
        inputs: &FinancialInputs,
        provenance: Provenance,
        narrative: Option<Narrative>,
    ) -> CreditAnalysisResult<ComputationOutput<Report>> {
        let start = Instant::now();

        for field in &self.config.required_fields {
            inputs.require(*field)?;
        }

        let (indicators, categories) = self.grade(inputs);
        let classification = classify(&categories, &self.config);

        let mut warnings = indicator_warnings(&indicators);
        warnings.extend(category_warnings(&categories));
        if let Some(c) = &classification {
            tracing::debug!(
                score = %c.weighted_credit_score,
                risk = %c.risk_category,
                "classification complete"
            );
            if c.weights_renormalized {
                tracing::warn!(
                    missing = ?c.missing_categories,
                    "category weights renormalized"
                );
                warnings.push(format!(
                    "Category weights renormalized over {} scored categories.",
                    c.scored_categories.len()
                ));
            }
        }

        let report = assemble_report(
            provenance,
            inputs.clone(),
            indicators,
            categories,
            classification,
            narrative,
        );

        match &report.classification {
            Some(c) => tracing::info!(
                company = report.provenance.company_name.as_deref().unwrap_or("unnamed"),
                risk = %c.risk_category,
                decision = %c.credit_decision,
                "credit analysis complete"
            ),
            None => {
                let missing = report.missing_categories();
                tracing::warn!(?missing, "no category could be scored");
                warnings.push(format!(
                    "No credit classification could be derived (categories without data: {}).",
                    missing.join(", ")
                ));
            }
        }

        Ok(self.envelope(warnings, start, report))
    }

    /// Ratios, grades and category scores only. Required-field checks do
    /// not apply.
    pub fn evaluate_indicators(
        &self,
        inputs: &FinancialInputs,
    ) -> ComputationOutput<IndicatorSummary> {
        let start = Instant::now();
        let (indicators, categories) = self.grade(inputs);
        let mut warnings = indicator_warnings(&indicators);
        warnings.extend(category_warnings(&categories));
        self.envelope(
            warnings,
            start,
            IndicatorSummary {
                indicators,
                categories,
            },
        )
    }

    /// Classification only, for callers that already hold category scores.
    pub fn classify(&self, categories: &[CategoryScore]) -> Option<ClassificationResult> {
        classify(categories, &self.config)
    }

    fn grade(&self, inputs: &FinancialInputs) -> (Vec<Indicator>, Vec<CategoryScore>) {
        let ratios = calculate_ratios(inputs);
        tracing::debug!(
            computable = ratios.values().filter(|v| v.is_some()).count(),
            total = ratios.len(),
            "ratios calculated"
        );
        let indicators = grade_all(&ratios, &self.config);
        let categories = aggregate_categories(&indicators, &self.config);
        tracing::debug!(
            scored = categories.iter().filter(|c| c.average_grade.is_some()).count(),
            "categories aggregated"
        );
        (indicators, categories)
    }

    fn envelope<T: Serialize>(
        &self,
        warnings: Vec<String>,
        start: Instant,
        result: T,
    ) -> ComputationOutput<T> {
        let assumptions = serde_json::json!({
            "category_weights": self.config.category_weights,
            "missing_category_policy": self.config.missing_category_policy,
            "band_rounding": format!("{BAND_COMPARISON_DP} dp, midpoint away from zero"),
            "rates_as_decimals": true,
            "field_set_version": FIELD_SET_VERSION,
        });
        let elapsed = start.elapsed().as_micros() as u64;
        with_metadata(
            METHODOLOGY,
            &assumptions,
            warnings,
            &self.config.version,
            elapsed,
            result,
        )
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn indicator_warnings(indicators: &[Indicator]) -> Vec<String> {
    indicators
        .iter()
        .filter(|i| !i.is_computable())
        .map(|i| format!("{}: insufficient data or zero divisor.", i.name))
        .collect()
}

fn category_warnings(categories: &[CategoryScore]) -> Vec<String> {
    categories
        .iter()
        .filter(|c| c.average_grade.is_none())
        .map(|c| {
            format!(
                "{}: insufficient data; excluded from the weighted credit score.",
                c.category
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CreditAnalysisError;
    use crate::indicators::IndicatorKind;
    use crate::inputs::InputField;
    use crate::report::ReportStatus;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> FinancialInputs {
        FinancialInputs {
            current_assets: Some(dec!(200_000)),
            current_liabilities: Some(dec!(100_000)),
            net_profit: Some(dec!(50_000)),
            revenue: Some(dec!(500_000)),
            total_liabilities: Some(dec!(150_000)),
            equity: Some(dec!(250_000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.required_fields.clear();
        config.version = String::new();
        let err = CreditScoringEngine::new(config).unwrap_err();
        assert!(matches!(err, CreditAnalysisError::Configuration(_)));
    }

    #[test]
    fn test_missing_required_field_rejects_request() {
        let engine = CreditScoringEngine::with_defaults();
        let inputs = sample_inputs().with(InputField::Revenue, None);
        let err = engine
            .analyze(&inputs, Provenance::default(), None)
            .unwrap_err();
        match err {
            CreditAnalysisError::MissingInput { field } => assert_eq!(field, InputField::Revenue),
            other => panic!("Expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn test_warnings_list_gaps_and_renormalization() {
        let engine = CreditScoringEngine::with_defaults();
        let out = engine
            .analyze(&sample_inputs(), Provenance::default(), None)
            .unwrap();
        assert!(out.warnings.iter().any(|w| w.starts_with("altman_z_score")));
        assert!(out.warnings.iter().any(|w| w.starts_with("Solvency")));
        assert!(out.warnings.iter().any(|w| w.contains("renormalized")));
        assert!(!out.warnings.iter().any(|w| w.starts_with("current_ratio")));
        assert_eq!(out.metadata.config_version, engine.config().version);
    }

    #[test]
    fn test_unscorable_request_returns_report_without_classification() {
        let engine = CreditScoringEngine::with_defaults();
        let inputs = FinancialInputs {
            revenue: Some(dec!(500_000)),
            cash: Some(dec!(10_000)),
            equity: Some(dec!(100_000)),
            ..Default::default()
        };
        let out = engine
            .analyze(&inputs, Provenance::default(), None)
            .unwrap();
        assert_eq!(out.result.status, ReportStatus::InsufficientData);
        assert!(out.result.classification.is_none());
        assert_eq!(out.result.indicators.len(), IndicatorKind::ALL.len());
        assert!(out.result.categories.iter().all(|c| c.average_grade.is_none()));
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("No credit classification could be derived")));
    }

    #[test]
    fn test_evaluate_indicators_skips_required_fields() {
        let engine = CreditScoringEngine::with_defaults();
        let inputs = FinancialInputs {
            current_assets: Some(dec!(100)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        let out = engine.evaluate_indicators(&inputs);
        assert_eq!(out.result.indicators.len(), 23);
        assert_eq!(out.result.categories.len(), 4);
    }

    #[test]
    fn test_analyze_request_carries_narrative() {
        let engine = CreditScoringEngine::with_defaults();
        let request = AnalysisRequest {
            provenance: Provenance {
                company_name: Some("Acme".into()),
                ..Default::default()
            },
            inputs: sample_inputs(),
            narrative: Some(Narrative {
                summary: "Sound balance sheet.".into(),
                ..Default::default()
            }),
        };
        let out = engine.analyze_request(request).unwrap();
        assert_eq!(out.result.provenance.company_name.as_deref(), Some("Acme"));
        assert_eq!(
            out.result.narrative.map(|n| n.summary),
            Some("Sound balance sheet.".to_string())
        );
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CreditScoringEngine>();
    }
}
