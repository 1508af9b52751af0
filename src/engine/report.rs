//! JSON rendering of the report.

use crate::domain::{MetricsResult, Report};

/// Renders the report as compact JSON.
///
/// # Errors
///
/// Returns `MetricsError::EncodingFailure` if serialization fails.
pub fn to_json(report: &Report) -> MetricsResult<String> {
    Ok(serde_json::to_string(report)?)
}

/// Renders the report as indented JSON.
///
/// # Errors
///
/// Returns `MetricsError::EncodingFailure` if serialization fails.
pub fn to_json_pretty(report: &Report) -> MetricsResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
