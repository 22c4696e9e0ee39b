//! Category aggregator: graded indicators -> per-category averages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classification::{risk_category_for, RiskCategory};
use crate::config::{EngineConfig, RiskBands};
use crate::indicators::{Category, Indicator};
use crate::types::GradeScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Scored,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub status: CategoryStatus,
    /// Mean grade score (1-5) of the computable member indicators. Exact;
    /// `None` when no member is computable.
    pub average_grade: Option<GradeScore>,
    pub scored_indicators: usize,
    pub total_indicators: usize,
    pub comment: String,
}

/// Group indicators by their category and average the grades of the
/// computable ones. Output is in [`Category::ALL`] order.
pub fn aggregate_categories(indicators: &[Indicator], config: &EngineConfig) -> Vec<CategoryScore> {
    Category::ALL
        .iter()
        .map(|category| {
            let members: Vec<&Indicator> = indicators
                .iter()
                .filter(|i| i.category == *category)
                .collect();
            let grades: Vec<Decimal> = members
                .iter()
                .filter_map(|i| i.grade)
                .map(|g| Decimal::from(g.score()))
                .collect();

            let average_grade = if grades.is_empty() {
                None
            } else {
                let sum: Decimal = grades.iter().copied().sum();
                Some(sum / Decimal::from(grades.len() as u64))
            };

            CategoryScore {
                category: *category,
                status: if average_grade.is_some() {
                    CategoryStatus::Scored
                } else {
                    CategoryStatus::InsufficientData
                },
                average_grade,
                scored_indicators: grades.len(),
                total_indicators: members.len(),
                comment: category_comment(*category, average_grade, &config.risk_bands),
            }
        })
        .collect()
}

/// One-line assessment of a category, banded like the overall risk category.
pub fn category_comment(category: Category, average: Option<GradeScore>, bands: &RiskBands) -> String {
    let subject = match category {
        Category::Liquidity => "short-term liquidity",
        Category::Leverage => "capital structure",
        Category::Profitability => "profitability",
        Category::Solvency => "solvency and debt service capacity",
    };
    let Some(avg) = average else {
        return format!("Insufficient data to assess {subject}");
    };
    match risk_category_for(avg, bands) {
        RiskCategory::Excellent => format!("Excellent {subject}"),
        RiskCategory::Good => format!("Good {subject}"),
        RiskCategory::Average => format!("Adequate {subject} with some weaknesses"),
        RiskCategory::Weak => format!("Weak {subject}; monitor closely"),
        RiskCategory::Critical => format!("Critical {subject}; significant credit risk"),
    }
}
