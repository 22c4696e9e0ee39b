//! Grader: raw indicator value -> A-E grade.
//!
//! Each indicator has a threshold table with an explicit [`Direction`] and
//! four strictly ordered cut-offs. Bands are inclusive at the cut-off, so a
//! current ratio of exactly 2.0 with an A cut-off of 2.0 grades A.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ratios::RatioValues;
use super::{Grade, Indicator, IndicatorKind};
use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// Threshold tables
// ---------------------------------------------------------------------------

/// Whether a larger raw value is a better or a worse credit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Grade cut-offs for one indicator, ordered A, B, C, D.
///
/// HigherIsBetter: `v >= a` is A, `v >= b` is B, ... anything below `d` is E.
/// LowerIsBetter: `v <= a` is A, `v <= b` is B, ... anything above `d` is E.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub direction: Direction,
    pub cutoffs: [Decimal; 4],
}

impl Thresholds {
    pub fn higher_is_better(cutoffs: [Decimal; 4]) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            cutoffs,
        }
    }

    pub fn lower_is_better(cutoffs: [Decimal; 4]) -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            cutoffs,
        }
    }

    /// Cut-offs must be strictly monotonic in the table's direction.
    pub fn validate(&self) -> Result<(), String> {
        let ordered = self.cutoffs.windows(2).all(|w| match self.direction {
            Direction::HigherIsBetter => w[0] > w[1],
            Direction::LowerIsBetter => w[0] < w[1],
        });
        if ordered {
            Ok(())
        } else {
            Err(format!(
                "cut-offs {:?} are not strictly {} for {:?}",
                self.cutoffs,
                match self.direction {
                    Direction::HigherIsBetter => "decreasing",
                    Direction::LowerIsBetter => "increasing",
                },
                self.direction
            ))
        }
    }

    /// Grade a computed value.
    ///
    /// A negative value of a lower-is-better indicator only arises from a
    /// negative denominator (negative equity or EBITDA) and grades E.
    pub fn grade(&self, value: Decimal) -> Grade {
        let bands = [Grade::A, Grade::B, Grade::C, Grade::D];
        match self.direction {
            Direction::HigherIsBetter => self
                .cutoffs
                .iter()
                .zip(bands)
                .find(|(cutoff, _)| value >= **cutoff)
                .map(|(_, g)| g)
                .unwrap_or(Grade::E),
            Direction::LowerIsBetter => {
                if value.is_sign_negative() && !value.is_zero() {
                    return Grade::E;
                }
                self.cutoffs
                    .iter()
                    .zip(bands)
                    .find(|(cutoff, _)| value <= **cutoff)
                    .map(|(_, g)| g)
                    .unwrap_or(Grade::E)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Grade one value. An uncomputable value has no grade.
pub fn grade_indicator(thresholds: &Thresholds, value: Option<Decimal>) -> Option<Grade> {
    value.map(|v| thresholds.grade(v))
}

/// Grade every computed ratio and attach its configured category.
///
/// The configuration is validated at engine construction, so every
/// indicator has a threshold table and a category.
pub fn grade_all(ratios: &RatioValues, config: &EngineConfig) -> Vec<Indicator> {
    IndicatorKind::ALL
        .iter()
        .map(|kind| {
            let raw_value = ratios.get(kind).copied().flatten();
            let grade = config
                .thresholds
                .get(kind)
                .and_then(|t| grade_indicator(t, raw_value));
            Indicator {
                name: *kind,
                raw_value,
                grade,
                category: config.category_of(*kind),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
