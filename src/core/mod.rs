pub mod errors;

pub use errors::{ConflictError, ErrorCode, Result};

use crate::risk::RiskLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized row of a metadata-change export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub component_id: String,
    pub story_id: String,
    pub committed_at: Option<DateTime<Utc>>,
    pub developer: Option<String>,
    pub component_type: Option<String>,
}

impl ChangeRecord {
    pub fn new(component_id: impl Into<String>, story_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            story_id: story_id.into(),
            committed_at: None,
            developer: None,
            component_type: None,
        }
    }

    pub fn with_committed_at(mut self, committed_at: DateTime<Utc>) -> Self {
        self.committed_at = Some(committed_at);
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }

    pub fn with_component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    /// Commit instant used for recency ordering.
    ///
    /// A record without a commit date is treated as committed at `now`, which
    /// makes it sort as the most recent change to its component.
    pub fn effective_committed_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.committed_at.unwrap_or(now)
    }
}

/// A story contributing to a conflict on one component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryMember {
    pub story_id: String,
    pub developer: Option<String>,
    pub committed_at: DateTime<Utc>,
    /// True when `committed_at` was defaulted to the evaluation instant.
    pub date_defaulted: bool,
    pub days_old: i64,
    pub is_latest: bool,
}

/// A component touched by two or more distinct stories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictGroup {
    pub component_id: String,
    pub component_type: Option<String>,
    /// Ordered newest first; the head is the latest member.
    pub stories: Vec<StoryMember>,
    pub days_behind: i64,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
}

impl ConflictGroup {
    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    pub fn latest(&self) -> Option<&StoryMember> {
        self.stories.iter().find(|s| s.is_latest)
    }

    pub fn member(&self, story_id: &str) -> Option<&StoryMember> {
        self.stories.iter().find(|s| s.story_id == story_id)
    }
}

/// A story whose captured component state predates production.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionFlag {
    pub story_id: String,
    pub component_id: String,
    pub developer: Option<String>,
    pub committed_at: DateTime<Utc>,
    pub production_committed_at: DateTime<Utc>,
    pub days_behind_production: i64,
    pub message: String,
}

/// Pre-aggregated counts consumed verbatim by report writers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_records: usize,
    pub unique_stories: usize,
    pub unique_components: usize,
    pub conflict_count: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub regression_count: usize,
    pub stories_with_regressions: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub generated_at: DateTime<Utc>,
    pub conflicts: Vec<ConflictGroup>,
    pub regressions: Vec<RegressionFlag>,
    pub summary: AnalysisSummary,
    /// Distinct developer names seen in the deployment records, sorted.
    pub developers: Vec<String>,
}

impl AnalysisResults {
    pub fn has_blocking_issues(&self) -> bool {
        self.summary.high_risk > 0 || self.summary.regression_count > 0
    }
}
