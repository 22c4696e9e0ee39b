//! Classifier: category averages -> weighted credit score, evaluation
//! score, risk category and credit decision.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::categories::CategoryScore;
use super::round_for_banding;
use crate::config::{EngineConfig, MissingCategoryPolicy, RiskBands};
use crate::indicators::{Category, Grade};
use crate::types::GradeScore;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Excellent,
    Good,
    Average,
    Weak,
    Critical,
}

impl RiskCategory {
    pub fn credit_decision(&self) -> CreditDecision {
        match self {
            RiskCategory::Excellent | RiskCategory::Good => CreditDecision::SafeToProceed,
            RiskCategory::Average => CreditDecision::ProceedWithCaution,
            RiskCategory::Weak => CreditDecision::NotRecommended,
            RiskCategory::Critical => CreditDecision::Decline,
        }
    }

    /// Company class A-E, one class per risk band.
    pub fn company_class(&self) -> Grade {
        match self {
            RiskCategory::Excellent => Grade::A,
            RiskCategory::Good => Grade::B,
            RiskCategory::Average => Grade::C,
            RiskCategory::Weak => Grade::D,
            RiskCategory::Critical => Grade::E,
        }
    }

    /// Indicative agency-scale ranges for the band.
    pub fn rating_equivalent(&self) -> RatingEquivalent {
        let (moodys, s_and_p) = match self {
            RiskCategory::Excellent => ("Aaa–A2", "AAA–A"),
            RiskCategory::Good => ("Baa1–Baa3", "BBB+"),
            RiskCategory::Average => ("Ba1–Ba3", "BB"),
            RiskCategory::Weak => ("B1–B3", "B"),
            RiskCategory::Critical => ("Caa–C", "CCC–D"),
        };
        RatingEquivalent {
            moodys: moodys.to_string(),
            s_and_p: s_and_p.to_string(),
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Excellent => write!(f, "Excellent"),
            RiskCategory::Good => write!(f, "Good"),
            RiskCategory::Average => write!(f, "Average"),
            RiskCategory::Weak => write!(f, "Weak"),
            RiskCategory::Critical => write!(f, "Critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditDecision {
    SafeToProceed,
    ProceedWithCaution,
    NotRecommended,
    Decline,
}

impl std::fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditDecision::SafeToProceed => write!(f, "Safe to Proceed"),
            CreditDecision::ProceedWithCaution => write!(f, "Proceed with Caution"),
            CreditDecision::NotRecommended => write!(f, "Not Recommended"),
            CreditDecision::Decline => write!(f, "Decline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEquivalent {
    pub moodys: String,
    pub s_and_p: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Weighted average of category averages, 1-5 scale, unrounded.
    pub weighted_credit_score: GradeScore,
    /// Weighted score rescaled to 0-100.
    pub evaluation_score: Decimal,
    pub risk_category: RiskCategory,
    pub credit_decision: CreditDecision,
    pub company_class: Grade,
    pub rating_equivalent: RatingEquivalent,
    pub scored_categories: Vec<Category>,
    /// Categories left out of the weighted score for lack of data.
    pub missing_categories: Vec<Category>,
    /// True when the configured weights were rescaled over
    /// `scored_categories`.
    pub weights_renormalized: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a set of category scores.
///
/// Returns `None` when no category could be scored, or when a category is
/// missing under [`MissingCategoryPolicy::InsufficientData`].
pub fn classify(categories: &[CategoryScore], config: &EngineConfig) -> Option<ClassificationResult> {
    let mut scored = Vec::new();
    let mut missing = Vec::new();
    let mut weighted_sum = Decimal::ZERO;
    let mut weight_total = Decimal::ZERO;

    for score in categories {
        match score.average_grade {
            Some(avg) => {
                let w = config.weight_of(score.category);
                weighted_sum += w * avg;
                weight_total += w;
                scored.push(score.category);
            }
            None => missing.push(score.category),
        }
    }

    if scored.is_empty() || weight_total.is_zero() {
        return None;
    }
    if !missing.is_empty() && config.missing_category_policy == MissingCategoryPolicy::InsufficientData {
        return None;
    }

    let weighted_credit_score = weighted_sum / weight_total;
    let risk_category = risk_category_for(weighted_credit_score, &config.risk_bands);

    Some(ClassificationResult {
        weighted_credit_score,
        evaluation_score: evaluation_score(weighted_credit_score),
        risk_category,
        credit_decision: risk_category.credit_decision(),
        company_class: risk_category.company_class(),
        rating_equivalent: risk_category.rating_equivalent(),
        weights_renormalized: !missing.is_empty(),
        scored_categories: scored,
        missing_categories: missing,
    })
}

/// Map a 1-5 score to its risk band. Bounds are inclusive lower bounds,
/// compared after [`round_for_banding`].
pub fn risk_category_for(score: GradeScore, bands: &RiskBands) -> RiskCategory {
    let s = round_for_banding(score);
    if s >= bands.excellent {
        RiskCategory::Excellent
    } else if s >= bands.good {
        RiskCategory::Good
    } else if s >= bands.average {
        RiskCategory::Average
    } else if s >= bands.weak {
        RiskCategory::Weak
    } else {
        RiskCategory::Critical
    }
}

/// `(score - 1) / 4 * 100`, clamped to [0, 100].
pub fn evaluation_score(score: GradeScore) -> Decimal {
    ((score - Decimal::ONE) / dec!(4) * dec!(100)).clamp(Decimal::ZERO, dec!(100))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
