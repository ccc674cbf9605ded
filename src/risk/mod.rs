//! Conflict risk classification.
//!
//! Risk is a pure function of how many stories touch a component and how far
//! apart (in days) their commits are. Story count alone never raises the tier:
//! a three-way conflict committed within the same hour stays LOW, while a
//! two-way conflict with a week-long gap is MEDIUM.
//!
//! The 0-100 [`risk_score`] is banded by [`RiskLevel`] so that the developer
//! view thresholds (80 blocked, 60 warning by default) line up with the tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Minimum distinct stories for HIGH (when also stale).
    pub high_story_count: usize,
    /// Minimum day gap between newest and oldest commit for MEDIUM/HIGH.
    pub stale_days: i64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_story_count: 3,
            stale_days: 5,
        }
    }
}

const LOW_BASE: i64 = 20;
const LOW_CAP: i64 = 55;
const MEDIUM_BASE: i64 = 60;
const MEDIUM_CAP: i64 = 79;
const HIGH_BASE: i64 = 80;
const HIGH_CAP: i64 = 100;

pub fn classify(story_count: usize, days_behind: i64, thresholds: &RiskThresholds) -> RiskLevel {
    let stale = days_behind >= thresholds.stale_days;
    if stale && story_count >= thresholds.high_story_count {
        RiskLevel::High
    } else if stale {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Numeric 0-100 risk for a conflict, banded by its [`RiskLevel`].
///
/// LOW scores stay in 20..=55, MEDIUM in 60..=79, HIGH in 80..=100.
pub fn risk_score(story_count: usize, days_behind: i64, thresholds: &RiskThresholds) -> u8 {
    let days = days_behind.max(0);
    let stories = story_count as i64;
    let overdue = (days - thresholds.stale_days).max(0);

    let score = match classify(story_count, days_behind, thresholds) {
        RiskLevel::Low => (LOW_BASE + 5 * days + 5 * (stories - 2).max(0)).min(LOW_CAP),
        RiskLevel::Medium => (MEDIUM_BASE + overdue).min(MEDIUM_CAP),
        RiskLevel::High => {
            let extra_stories = (stories - thresholds.high_story_count as i64).max(0);
            (HIGH_BASE + overdue + 2 * extra_stories).min(HIGH_CAP)
        }
    };
    score.clamp(0, HIGH_CAP) as u8
}

/// Classifier bound to a set of thresholds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RiskClassifier {
    pub thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn assess(&self, story_count: usize, days_behind: i64) -> (RiskLevel, u8) {
        (
            classify(story_count, days_behind, &self.thresholds),
            risk_score(story_count, days_behind, &self.thresholds),
        )
    }
}
