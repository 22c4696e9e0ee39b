use thiserror::Error;

use crate::inputs::InputField;

#[derive(Debug, Error)]
pub enum CreditAnalysisError {
    #[error("Missing input: {field} is required for the analysis")]
    MissingInput { field: InputField },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CreditAnalysisError {
    fn from(e: serde_json::Error) -> Self {
        CreditAnalysisError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for CreditAnalysisError {
    fn from(e: serde_yaml::Error) -> Self {
        CreditAnalysisError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let missing = CreditAnalysisError::MissingInput {
            field: InputField::Revenue,
        };
        assert_eq!(
            missing.to_string(),
            "Missing input: revenue is required for the analysis"
        );

        let invalid = CreditAnalysisError::InvalidInput {
            field: "revenue".into(),
            reason: "must be positive".into(),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid input: revenue: must be positive"
        );
    }
}
