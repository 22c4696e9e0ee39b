//! Engine configuration: threshold tables, category membership, category
//! weights, risk bands and required inputs.
//!
//! A configuration is an immutable value handed to
//! [`CreditScoringEngine::new`](crate::engine::CreditScoringEngine::new),
//! which validates it once. A malformed configuration is a deployment
//! error and never reaches a request.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CreditAnalysisError;
use crate::indicators::grading::Thresholds;
use crate::indicators::{Category, IndicatorKind};
use crate::inputs::InputField;
use crate::CreditAnalysisResult;

pub const DEFAULT_CONFIG_VERSION: &str = "1.1";

/// Lowest and highest grade scores.
const SCALE_MIN: Decimal = dec!(1);
const SCALE_MAX: Decimal = dec!(5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the classifier does when a whole category has no computable
/// indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCategoryPolicy {
    /// Rescale the weights of the scored categories so they sum to 1 and
    /// flag the result as renormalized.
    #[default]
    Renormalize,
    /// Withhold the classification entirely.
    InsufficientData,
}

/// Lower bounds (inclusive) of the risk bands on the 1-5 score scale.
/// Anything below `weak` is Critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBands {
    pub excellent: Decimal,
    pub good: Decimal,
    pub average: Decimal,
    pub weak: Decimal,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            excellent: dec!(4.5),
            good: dec!(3.5),
            average: dec!(2.5),
            weak: dec!(1.5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Version of the threshold/weight tables, echoed into every output.
    pub version: String,
    pub thresholds: BTreeMap<IndicatorKind, Thresholds>,
    /// Static indicator -> category lookup.
    pub categories: BTreeMap<IndicatorKind, Category>,
    /// Weight per category. Must be positive and sum to exactly 1.
    pub category_weights: BTreeMap<Category, Decimal>,
    pub risk_bands: RiskBands,
    /// Fields without which a request is rejected outright.
    pub required_fields: Vec<InputField>,
    #[serde(default)]
    pub missing_category_policy: MissingCategoryPolicy,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_thresholds() -> BTreeMap<IndicatorKind, Thresholds> {
    use IndicatorKind::*;
    let hib = Thresholds::higher_is_better;
    let lib = Thresholds::lower_is_better;
    BTreeMap::from([
        // Liquidity
        (CurrentRatio, hib([dec!(2.0), dec!(1.5), dec!(1.0), dec!(0.7)])),
        (QuickRatio, hib([dec!(1.5), dec!(1.0), dec!(0.8), dec!(0.5)])),
        (CashRatio, hib([dec!(0.5), dec!(0.3), dec!(0.2), dec!(0.1)])),
        (
            WorkingCapitalToAssets,
            hib([dec!(0.25), dec!(0.15), dec!(0.05), Decimal::ZERO]),
        ),
        // Leverage
        (DebtToEquityRatio, lib([dec!(0.3), dec!(0.6), dec!(1.0), dec!(1.5)])),
        (DebtRatio, lib([dec!(0.3), dec!(0.5), dec!(0.6), dec!(0.8)])),
        (EquityRatio, hib([dec!(0.5), dec!(0.4), dec!(0.3), dec!(0.2)])),
        (DebtToEbitda, lib([dec!(1.0), dec!(2.0), dec!(3.5), dec!(5.0)])),
        // Profitability
        (GrossProfitMargin, hib([dec!(0.40), dec!(0.30), dec!(0.20), dec!(0.10)])),
        (
            OperatingProfitMargin,
            hib([dec!(0.20), dec!(0.15), dec!(0.10), dec!(0.05)]),
        ),
        (NetProfitMargin, hib([dec!(0.20), dec!(0.15), dec!(0.10), dec!(0.05)])),
        (ReturnOnAssets, hib([dec!(0.15), dec!(0.10), dec!(0.05), dec!(0.01)])),
        (ReturnOnEquity, hib([dec!(0.15), dec!(0.10), dec!(0.05), dec!(0.01)])),
        (ReturnOnInvestment, hib([dec!(0.15), dec!(0.10), dec!(0.05), dec!(0.01)])),
        (EarningsPerShare, hib([dec!(2.0), dec!(1.0), dec!(0.5), dec!(0.1)])),
        (PriceToEarningsRatio, lib([dec!(10), dec!(20), dec!(30), dec!(40)])),
        // Solvency
        (InterestCoverageRatio, hib([dec!(8), dec!(5), dec!(3), dec!(1.5)])),
        (DebtServiceCoverageRatio, hib([dec!(2.0), dec!(1.5), dec!(1.25), dec!(1.0)])),
        (AssetTurnover, hib([dec!(2.0), dec!(1.5), dec!(1.0), dec!(0.5)])),
        (InventoryTurnover, hib([dec!(10), dec!(7), dec!(5), dec!(2)])),
        (ReceivablesTurnover, hib([dec!(12), dec!(9), dec!(7), dec!(3)])),
        (DaysSalesOutstanding, lib([dec!(30), dec!(45), dec!(73), dec!(90)])),
        (AltmanZScore, hib([dec!(3.0), dec!(2.5), dec!(1.8), dec!(1.2)])),
    ])
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            thresholds: default_thresholds(),
            categories: IndicatorKind::ALL
                .iter()
                .map(|k| (*k, k.default_category()))
                .collect(),
            category_weights: BTreeMap::from([
                (Category::Liquidity, dec!(0.25)),
                (Category::Leverage, dec!(0.30)),
                (Category::Profitability, dec!(0.25)),
                (Category::Solvency, dec!(0.20)),
            ]),
            risk_bands: RiskBands::default(),
            required_fields: vec![InputField::Revenue],
            missing_category_policy: MissingCategoryPolicy::Renormalize,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> CreditAnalysisResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> CreditAnalysisResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Category of an indicator. Falls back to the built-in membership, which
    /// only matters for configurations that skipped [`validate`](Self::validate).
    pub fn category_of(&self, kind: IndicatorKind) -> Category {
        self.categories
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_category())
    }

    pub fn weight_of(&self, category: Category) -> Decimal {
        self.category_weights
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Check every table. Errors are fatal at startup.
    pub fn validate(&self) -> CreditAnalysisResult<()> {
        if self.version.trim().is_empty() {
            return Err(config_error("version must not be empty"));
        }

        for kind in IndicatorKind::ALL {
            let table = self
                .thresholds
                .get(&kind)
                .ok_or_else(|| config_error(format!("no threshold table for {kind}")))?;
            table
                .validate()
                .map_err(|reason| config_error(format!("{kind}: {reason}")))?;

            if !self.categories.contains_key(&kind) {
                return Err(config_error(format!("{kind} is not assigned to a category")));
            }
        }

        for category in Category::ALL {
            if !self.categories.values().any(|c| *c == category) {
                return Err(config_error(format!("category {category} has no indicators")));
            }
            match self.category_weights.get(&category) {
                None => return Err(config_error(format!("no weight for category {category}"))),
                Some(w) if *w <= Decimal::ZERO => {
                    return Err(config_error(format!(
                        "weight for {category} must be positive, got {w}"
                    )))
                }
                Some(_) => {}
            }
        }

        let total: Decimal = self.category_weights.values().copied().sum();
        if total != Decimal::ONE {
            return Err(config_error(format!(
                "category weights must sum to 1, got {total}"
            )));
        }

        let b = &self.risk_bands;
        let ordered = SCALE_MIN <= b.weak
            && b.weak < b.average
            && b.average < b.good
            && b.good < b.excellent
            && b.excellent <= SCALE_MAX;
        if !ordered {
            return Err(config_error(format!(
                "risk bands must satisfy 1 <= weak < average < good < excellent <= 5, got {b:?}"
            )));
        }

        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> CreditAnalysisError {
    CreditAnalysisError::Configuration(reason.into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_config_error(config: &EngineConfig, needle: &str) {
        match config.validate().unwrap_err() {
            CreditAnalysisError::Configuration(msg) => {
                assert!(msg.contains(needle), "'{msg}' should mention '{needle}'")
            }
            other => panic!("Expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.thresholds.len(), IndicatorKind::ALL.len());
        assert_eq!(config.categories.len(), IndicatorKind::ALL.len());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = EngineConfig::default();
        config
            .category_weights
            .insert(Category::Solvency, dec!(0.25));
        assert_config_error(&config, "sum to 1");
    }

    #[test]
    fn test_weight_must_be_positive() {
        let mut config = EngineConfig::default();
        config.category_weights.insert(Category::Solvency, dec!(0));
        config
            .category_weights
            .insert(Category::Leverage, dec!(0.50));
        assert_config_error(&config, "must be positive");
    }

    #[test]
    fn test_missing_threshold_table_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.remove(&IndicatorKind::AltmanZScore);
        assert_config_error(&config, "altman_z_score");
    }

    #[test]
    fn test_misdirected_threshold_table_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.insert(
            IndicatorKind::DebtRatio,
            Thresholds::lower_is_better([dec!(0.8), dec!(0.6), dec!(0.5), dec!(0.3)]),
        );
        assert_config_error(&config, "debt_ratio");
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut config = EngineConfig::default();
        for kind in IndicatorKind::ALL {
            if kind.default_category() == Category::Solvency {
                config.categories.insert(kind, Category::Leverage);
            }
        }
        assert_config_error(&config, "Solvency has no indicators");
    }

    #[test]
    fn test_risk_bands_must_be_ordered() {
        let mut config = EngineConfig::default();
        config.risk_bands.good = dec!(4.6);
        assert_config_error(&config, "risk bands");
    }

    #[test]
    fn test_json_round_trip_keeps_validity() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        let parsed = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }

    #[test]
    fn test_json_with_bad_weights_is_rejected_on_load() {
        let mut value = serde_json::to_value(EngineConfig::default()).unwrap();
        value["category_weights"]["Liquidity"] = serde_json::json!("0.5");
        let err = EngineConfig::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, CreditAnalysisError::Configuration(_)));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_config_loads() {
        let yaml = serde_yaml::to_string(&EngineConfig::default()).unwrap();
        let parsed = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.version, DEFAULT_CONFIG_VERSION);
    }
}
