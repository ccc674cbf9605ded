//! Configuration validation.
//!
//! All problems are collected before failing so a user fixes their config
//! file in one pass.

use super::core::ConflictmapConfig;
use crate::core::{ConflictError, Result};

const KNOWN_FORMATS: &[&str] = &["terminal", "json", "markdown"];

pub fn validate_config(config: &ConflictmapConfig) -> Result<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConflictError::config(errors.join("; ")))
    }
}

fn collect_errors(config: &ConflictmapConfig) -> Vec<String> {
    let mut errors = Vec::new();

    let risk = config.risk_thresholds();
    if risk.high_story_count < 2 {
        errors.push(format!(
            "risk.high_story_count must be at least 2 (got {})",
            risk.high_story_count
        ));
    }
    if risk.stale_days < 0 {
        errors.push(format!(
            "risk.stale_days must not be negative (got {})",
            risk.stale_days
        ));
    }

    let status = config.status_thresholds();
    if status.blocked_score > 100 {
        errors.push(format!(
            "developer.blocked_score must be at most 100 (got {})",
            status.blocked_score
        ));
    }
    if status.warning_score > status.blocked_score {
        errors.push(format!(
            "developer.warning_score ({}) must not exceed developer.blocked_score ({})",
            status.warning_score, status.blocked_score
        ));
    }

    if let Some(format) = config.default_format() {
        if !KNOWN_FORMATS.contains(&format) {
            errors.push(format!(
                "output.default_format must be one of {} (got {format:?})",
                KNOWN_FORMATS.join(", ")
            ));
        }
    }

    errors
}
