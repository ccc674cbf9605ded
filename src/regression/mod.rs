//! Detection of stories whose captured component state predates production.

use crate::conflicts::whole_days_between;
use crate::core::{ChangeRecord, RegressionFlag};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Latest known production commit per component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductionBaseline {
    committed: HashMap<String, DateTime<Utc>>,
}

impl ProductionBaseline {
    /// Build from baseline records. Undated rows carry no production state
    /// and are ignored; repeated components keep their newest timestamp.
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        let mut committed: HashMap<String, DateTime<Utc>> = HashMap::new();
        for record in records {
            let Some(at) = record.committed_at else {
                continue;
            };
            committed
                .entry(record.component_id.clone())
                .and_modify(|existing| {
                    if at > *existing {
                        *existing = at;
                    }
                })
                .or_insert(at);
        }
        Self { committed }
    }

    pub fn committed_at(&self, component_id: &str) -> Option<DateTime<Utc>> {
        self.committed.get(component_id).copied()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

/// Flag every `(story, component)` whose deployment commit is strictly older
/// than production's. Without a baseline nothing is flagged.
///
/// Every record is compared. A pair with several offending rows yields one
/// flag, built from the first of them.
pub fn detect_regressions(
    records: &[ChangeRecord],
    baseline: Option<&ProductionBaseline>,
    now: DateTime<Utc>,
) -> Vec<RegressionFlag> {
    let Some(baseline) = baseline else {
        return Vec::new();
    };

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    records
        .iter()
        .filter_map(|record| {
            let production = baseline.committed_at(&record.component_id)?;
            let captured = record.effective_committed_at(now);
            if captured < production
                && seen.insert((record.story_id.as_str(), record.component_id.as_str()))
            {
                Some(regression_flag(record, captured, production))
            } else {
                None
            }
        })
        .collect()
}

fn regression_flag(
    record: &ChangeRecord,
    captured: DateTime<Utc>,
    production: DateTime<Utc>,
) -> RegressionFlag {
    let days = whole_days_between(captured, production);
    let message = format!(
        "{} in {} was captured {} but production has a newer version from {} ({} day{} newer)",
        record.component_id,
        record.story_id,
        captured.format("%Y-%m-%d"),
        production.format("%Y-%m-%d"),
        days,
        if days == 1 { "" } else { "s" },
    );

    RegressionFlag {
        story_id: record.story_id.clone(),
        component_id: record.component_id.clone(),
        developer: record.developer.clone(),
        committed_at: captured,
        production_committed_at: production,
        days_behind_production: days,
        message,
    }
}
