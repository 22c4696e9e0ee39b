//! Financial ratio and credit scoring engine.
//!
//! Raw statement fields ([`FinancialInputs`]) flow through a strict,
//! stateless pipeline:
//!
//! 1. [`indicators::ratios`] computes 23 named ratios,
//! 2. [`indicators::grading`] grades each one A-E,
//! 3. [`scoring::categories`] averages grades per category,
//! 4. [`scoring::classification`] derives the weighted credit score, risk
//!    category and credit decision,
//! 5. [`report`] assembles the versioned [`Report`].
//!
//! [`CreditScoringEngine`] runs the stages against an immutable
//! [`EngineConfig`].
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod inputs;
pub mod report;
pub mod scoring;
pub mod types;

#[cfg(feature = "readiness")]
pub mod readiness;

pub use config::EngineConfig;
pub use engine::{AnalysisRequest, CreditScoringEngine};
pub use error::CreditAnalysisError;
pub use inputs::{FinancialInputs, InputField};
pub use report::Report;
pub use types::*;

/// Standard result type for all credit-analysis operations
pub type CreditAnalysisResult<T> = Result<T, CreditAnalysisError>;
