//! Report assembler.
//!
//! Pure aggregation of the pipeline outputs into one versioned, immutable
//! [`Report`]. No computation happens here.

use serde::{Deserialize, Serialize};

use crate::indicators::Indicator;
use crate::inputs::FinancialInputs;
use crate::scoring::categories::CategoryScore;
use crate::scoring::classification::ClassificationResult;

/// Bumped whenever a field of [`Report`] changes shape.
pub const REPORT_SCHEMA_VERSION: &str = "1.1";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where the figures came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSource {
    #[default]
    Manual,
    Document {
        file_name: String,
    },
    Csv {
        file_name: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub company_name: Option<String>,
    pub fiscal_year: Option<String>,
    #[serde(default)]
    pub source: InputSource,
}

/// Narrative produced by an external text-generation collaborator. Carried
/// through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Complete,
    /// Every category lacked data; indicators and categories are still
    /// reported but there is no classification.
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub status: ReportStatus,
    pub provenance: Provenance,
    pub inputs: FinancialInputs,
    pub indicators: Vec<Indicator>,
    pub categories: Vec<CategoryScore>,
    /// `null` when no category could be scored.
    pub classification: Option<ClassificationResult>,
    pub narrative: Option<Narrative>,
}

impl Report {
    /// Categories without a single computable indicator.
    pub fn missing_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.average_grade.is_none())
            .map(|c| c.category.to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Combine the pipeline outputs into a report.
///
/// A missing classification marks the report
/// [`ReportStatus::InsufficientData`]; the graded indicators and category
/// scores are kept either way.
pub fn assemble_report(
    provenance: Provenance,
    inputs: FinancialInputs,
    indicators: Vec<Indicator>,
    categories: Vec<CategoryScore>,
    classification: Option<ClassificationResult>,
    narrative: Option<Narrative>,
) -> Report {
    let status = match classification {
        Some(_) => ReportStatus::Complete,
        None => ReportStatus::InsufficientData,
    };

    Report {
        schema_version: REPORT_SCHEMA_VERSION.to_string(),
        status,
        provenance,
        inputs,
        indicators,
        categories,
        classification,
        narrative,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
