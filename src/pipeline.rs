//! End-to-end analysis of one input snapshot.
//!
//! Normalizer, grouper and classifier run in sequence; the regression detector
//! reads the same normalized records plus the optional baseline. Every call
//! builds fresh structures and shares nothing with other calls.

use crate::config::ConflictmapConfig;
use crate::conflicts::group_conflicts;
use crate::core::{AnalysisResults, AnalysisSummary, ChangeRecord, ConflictGroup, RegressionFlag, Result};
use crate::ingest::{normalize, normalize_baseline};
use crate::observability::{set_phase, AnalysisPhase};
use crate::regression::{detect_regressions, ProductionBaseline};
use crate::risk::{RiskClassifier, RiskLevel};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};

/// Analyze raw export text.
///
/// Fails on an unresolvable header or an export with no usable rows, in
/// either input. No partial result is returned.
pub fn analyze(
    deployment: &str,
    baseline: Option<&str>,
    config: &ConflictmapConfig,
    now: DateTime<Utc>,
) -> Result<AnalysisResults> {
    let _phase = set_phase(AnalysisPhase::Normalizing);
    let aliases = config.alias_table();
    let records = normalize(deployment, &aliases)?;
    let baseline = baseline
        .map(|text| normalize_baseline(text, &aliases))
        .transpose()?
        .map(|rows| ProductionBaseline::from_records(&rows));

    Ok(analyze_records(&records, baseline.as_ref(), config, now))
}

/// Analyze already-normalized records.
pub fn analyze_records(
    records: &[ChangeRecord],
    baseline: Option<&ProductionBaseline>,
    config: &ConflictmapConfig,
    now: DateTime<Utc>,
) -> AnalysisResults {
    let classifier = RiskClassifier::new(config.risk_thresholds());
    let conflicts = {
        let _phase = set_phase(AnalysisPhase::Grouping);
        group_conflicts(records, &classifier, now)
    };
    let regressions = {
        let _phase = set_phase(AnalysisPhase::RegressionCheck);
        detect_regressions(records, baseline, now)
    };
    let summary = summarize(records, &conflicts, &regressions);

    AnalysisResults {
        generated_at: now,
        conflicts,
        regressions,
        summary,
        developers: known_developers(records),
    }
}

fn summarize(
    records: &[ChangeRecord],
    conflicts: &[ConflictGroup],
    regressions: &[RegressionFlag],
) -> AnalysisSummary {
    let unique_stories: HashSet<&str> = records.iter().map(|r| r.story_id.as_str()).collect();
    let unique_components: HashSet<&str> =
        records.iter().map(|r| r.component_id.as_str()).collect();
    let regressed_stories: HashSet<&str> =
        regressions.iter().map(|r| r.story_id.as_str()).collect();
    let at_level = |level: RiskLevel| conflicts.iter().filter(|g| g.risk_level == level).count();

    AnalysisSummary {
        total_records: records.len(),
        unique_stories: unique_stories.len(),
        unique_components: unique_components.len(),
        conflict_count: conflicts.len(),
        high_risk: at_level(RiskLevel::High),
        medium_risk: at_level(RiskLevel::Medium),
        low_risk: at_level(RiskLevel::Low),
        regression_count: regressions.len(),
        stories_with_regressions: regressed_stories.len(),
    }
}

fn known_developers(records: &[ChangeRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.developer.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConflictError;
    use crate::testkit::helpers::{at, export_csv};

    #[test]
    fn summary_counts_match_results() {
        let deployment = export_csv(&[
            ("US-1", "ClassA", "2024-01-10", "Alice"),
            ("US-2", "ClassA", "2024-01-01", "Bob"),
            ("US-3", "ClassA", "2024-01-09", "Carol"),
            ("US-1", "ClassB", "2024-01-10", "Alice"),
            ("US-4", "ClassB", "2024-01-10", "Dan"),
            ("US-5", "ClassC", "2024-01-10", "Erin"),
        ]);
        let baseline = "Component,Date\nClassB,2024-01-12\n";
        let results = analyze(
            &deployment,
            Some(baseline),
            &ConflictmapConfig::default(),
            at("2024-01-20"),
        )
        .unwrap();

        let s = &results.summary;
        assert_eq!(s.total_records, 6);
        assert_eq!(s.unique_stories, 5);
        assert_eq!(s.unique_components, 3);
        assert_eq!(s.conflict_count, 2);
        assert_eq!(s.high_risk, 1);
        assert_eq!(s.low_risk, 1);
        assert_eq!(s.medium_risk, 0);
        assert_eq!(s.regression_count, 2);
        assert_eq!(s.stories_with_regressions, 2);
        assert_eq!(results.developers, vec!["Alice", "Bob", "Carol", "Dan", "Erin"]);
        assert!(results.has_blocking_issues());
    }

    #[test]
    fn baseline_schema_errors_abort_analysis() {
        let deployment = export_csv(&[("US-1", "ClassA", "2024-01-10", "Alice")]);
        let err = analyze(
            &deployment,
            Some("Owner,Date\nAlice,2024-01-01\n"),
            &ConflictmapConfig::default(),
            at("2024-01-20"),
        )
        .unwrap_err();
        assert!(matches!(err, ConflictError::Schema { .. }));
    }

    #[test]
    fn undated_export_keeps_last_modified_by_as_developer() {
        let deployment = "User Story,Metadata API Name,Last Modified By\n\
                          US-1,ClassA,Alice\n\
                          US-2,ClassA,Bob\n";
        let results = analyze(
            deployment,
            None,
            &ConflictmapConfig::default(),
            at("2024-01-20"),
        )
        .unwrap();
        assert_eq!(results.developers, vec!["Alice", "Bob"]);
        assert!(results.conflicts[0].stories.iter().all(|m| m.date_defaulted));
    }

    #[test]
    fn thresholds_come_from_config() {
        let deployment = export_csv(&[
            ("US-1", "ClassA", "2024-01-10", "Alice"),
            ("US-2", "ClassA", "2024-01-08", "Bob"),
        ]);
        let config = crate::config::parse_and_validate_config(
            "[risk]\nhigh_story_count = 2\nstale_days = 2\n",
        )
        .unwrap();
        let results = analyze(&deployment, None, &config, at("2024-01-20")).unwrap();
        assert_eq!(results.conflicts[0].risk_level, RiskLevel::High);
    }
}
