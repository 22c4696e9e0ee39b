pub mod analyze;
pub mod config;
pub mod fields;
pub mod ratios;
pub mod readiness;
