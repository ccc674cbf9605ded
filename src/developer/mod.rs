//! Per-developer deployment guidance.
//!
//! Views are derived on demand from conflicts and regression flags; nothing
//! here is cached between calls. Each `(developer, story)` pair is evaluated
//! on its own, first matching rule wins:
//!
//! 1. any regression flag for the story: BLOCKED
//! 2. highest conflict score >= `blocked_score`: BLOCKED
//! 3. highest conflict score >= `warning_score`: WARNING
//! 4. otherwise SAFE

use crate::core::{ConflictGroup, RegressionFlag};
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const REASON_REGRESSION: &str = "component is older than production";
pub const REASON_HIGH_RISK: &str = "high-risk conflicts: manual merge required";
pub const REASON_MEDIUM_RISK: &str = "medium-risk conflicts: review needed";
pub const REASON_SAFE: &str = "no blocking issues";

/// Declared in display priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoryStatus {
    /// Cannot deploy as-is.
    Blocked,
    /// Needs coordinated review.
    Warning,
    /// No blocking issues.
    Safe,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "BLOCKED",
            Self::Warning => "WARNING",
            Self::Safe => "SAFE",
        }
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    pub blocked_score: u8,
    pub warning_score: u8,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            blocked_score: 80,
            warning_score: 60,
        }
    }
}

/// One conflict as seen from a participating story.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryConflict {
    pub component_id: String,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    /// Whether this story carries the most recent change to the component.
    pub holds_latest: bool,
    pub competing_stories: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperStoryView {
    pub developer: String,
    pub story_id: String,
    pub components: Vec<String>,
    pub conflicts: Vec<StoryConflict>,
    /// Components flagged as older than production.
    pub regressions: Vec<String>,
    pub max_risk_score: u8,
    pub status: StoryStatus,
    pub reason: String,
    pub actions: Vec<String>,
    pub other_developers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperReport {
    pub developer: String,
    pub stories: Vec<DeveloperStoryView>,
}

impl DeveloperReport {
    pub fn count(&self, status: StoryStatus) -> usize {
        self.stories.iter().filter(|s| s.status == status).count()
    }
}

fn member_of(group: &ConflictGroup, story_id: &str, developer: &str) -> bool {
    group
        .member(story_id)
        .is_some_and(|m| m.developer.as_deref() == Some(developer))
}

/// Stories attributed to `developer`, in encounter order: conflicts first,
/// then regression flags.
fn stories_for(
    developer: &str,
    conflicts: &[ConflictGroup],
    regressions: &[RegressionFlag],
) -> Vec<String> {
    let from_conflicts = conflicts.iter().flat_map(|g| {
        g.stories
            .iter()
            .filter(|m| m.developer.as_deref() == Some(developer))
            .map(|m| m.story_id.as_str())
    });
    let from_regressions = regressions
        .iter()
        .filter(|r| r.developer.as_deref() == Some(developer))
        .map(|r| r.story_id.as_str());

    let mut stories: Vec<String> = Vec::new();
    for story in from_conflicts.chain(from_regressions) {
        if !stories.iter().any(|s| s == story) {
            stories.push(story.to_string());
        }
    }
    stories
}

fn story_conflict(group: &ConflictGroup, story_id: &str) -> StoryConflict {
    StoryConflict {
        component_id: group.component_id.clone(),
        risk_level: group.risk_level,
        risk_score: group.risk_score,
        holds_latest: group.member(story_id).is_some_and(|m| m.is_latest),
        competing_stories: group
            .stories
            .iter()
            .filter(|m| m.story_id != story_id)
            .map(|m| m.story_id.clone())
            .collect(),
    }
}

fn other_developers(developer: &str, story_id: &str, groups: &[&ConflictGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.stories.iter())
        .filter(|m| m.story_id != story_id)
        .filter_map(|m| m.developer.as_deref())
        .filter(|d| *d != developer)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn decide(
    regressions: &[String],
    components: &[String],
    others: &[String],
    max_score: u8,
    thresholds: &StatusThresholds,
) -> (StoryStatus, &'static str, Vec<String>) {
    let owners = join_or(others, "the other story owners");

    if !regressions.is_empty() {
        let stale = regressions.join(", ");
        return (
            StoryStatus::Blocked,
            REASON_REGRESSION,
            vec![
                format!("Pull the latest production version of {stale}"),
                "Rebase the story branch onto production".to_string(),
                format!("Recommit {stale} on top of the production version"),
                "Update the user story tracking in Copado".to_string(),
            ],
        );
    }

    let touched = components.join(", ");
    if max_score >= thresholds.blocked_score {
        (
            StoryStatus::Blocked,
            REASON_HIGH_RISK,
            vec![
                format!("Coordinate a manual merge with {owners}"),
                format!("Merge the competing changes to {touched} by hand"),
                "Re-validate the merged story before promoting it".to_string(),
            ],
        )
    } else if max_score >= thresholds.warning_score {
        (
            StoryStatus::Warning,
            REASON_MEDIUM_RISK,
            vec![
                format!("Review the overlapping changes to {touched} with {owners}"),
                "Agree on a deployment order before promoting".to_string(),
            ],
        )
    } else {
        (
            StoryStatus::Safe,
            REASON_SAFE,
            vec!["Follow the standard deployment process".to_string()],
        )
    }
}

fn build_story_view(
    developer: &str,
    story_id: &str,
    conflicts: &[ConflictGroup],
    regressions: &[RegressionFlag],
    thresholds: &StatusThresholds,
) -> DeveloperStoryView {
    let groups: Vec<&ConflictGroup> = conflicts
        .iter()
        .filter(|g| member_of(g, story_id, developer))
        .collect();

    let mut stale: Vec<String> = Vec::new();
    for flag in regressions.iter().filter(|r| r.story_id == story_id) {
        if !stale.contains(&flag.component_id) {
            stale.push(flag.component_id.clone());
        }
    }

    let mut components: Vec<String> = groups.iter().map(|g| g.component_id.clone()).collect();
    for component in &stale {
        if !components.contains(component) {
            components.push(component.clone());
        }
    }

    let max_risk_score = groups.iter().map(|g| g.risk_score).max().unwrap_or(0);
    let others = other_developers(developer, story_id, &groups);
    let (status, reason, actions) =
        decide(&stale, &components, &others, max_risk_score, thresholds);

    DeveloperStoryView {
        developer: developer.to_string(),
        story_id: story_id.to_string(),
        components,
        conflicts: groups.iter().map(|g| story_conflict(g, story_id)).collect(),
        regressions: stale,
        max_risk_score,
        status,
        reason: reason.to_string(),
        actions,
        other_developers: others,
    }
}

/// Build every story view for one developer, BLOCKED first, then WARNING,
/// then SAFE; ties keep encounter order.
pub fn build_developer_view(
    developer: &str,
    conflicts: &[ConflictGroup],
    regressions: &[RegressionFlag],
    thresholds: &StatusThresholds,
) -> Vec<DeveloperStoryView> {
    let mut views: Vec<DeveloperStoryView> = stories_for(developer, conflicts, regressions)
        .iter()
        .map(|story| build_story_view(developer, story, conflicts, regressions, thresholds))
        .collect();
    views.sort_by_key(|v| v.status);
    views
}

/// Reports for each named developer, skipping developers with no affected stories.
pub fn build_all_developer_views(
    developers: &[String],
    conflicts: &[ConflictGroup],
    regressions: &[RegressionFlag],
    thresholds: &StatusThresholds,
) -> Vec<DeveloperReport> {
    developers
        .iter()
        .map(|developer| DeveloperReport {
            developer: developer.clone(),
            stories: build_developer_view(developer, conflicts, regressions, thresholds),
        })
        .filter(|report| !report.stories.is_empty())
        .collect()
}
