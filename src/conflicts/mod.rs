//! Grouping of change records into per-component conflicts.
//!
//! Records are partitioned by component id in first-seen order. Within a
//! component only the first record per story counts. Components touched by a
//! single story are not conflicts and are dropped. Members are then stably
//! sorted newest first, so equal timestamps keep their input order and the
//! earliest-seen of them becomes the latest member.

use crate::core::{ChangeRecord, ConflictGroup, StoryMember};
use crate::risk::RiskClassifier;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Records touching one component, one per story, in input order.
struct Partition<'a> {
    component_id: &'a str,
    records: Vec<&'a ChangeRecord>,
}

impl<'a> Partition<'a> {
    fn add(&mut self, record: &'a ChangeRecord) {
        let seen = self.records.iter().any(|r| r.story_id == record.story_id);
        if !seen {
            self.records.push(record);
        }
    }
}

fn partition(records: &[ChangeRecord]) -> Vec<Partition<'_>> {
    let mut partitions: Vec<Partition<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let slot = *index
            .entry(record.component_id.as_str())
            .or_insert_with(|| {
                partitions.push(Partition {
                    component_id: &record.component_id,
                    records: Vec::new(),
                });
                partitions.len() - 1
            });
        partitions[slot].add(record);
    }

    partitions
}

/// Whole days from `earlier` to `later`, floored, never negative.
pub fn whole_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_days().max(0)
}

fn build_group(
    partition: Partition<'_>,
    classifier: &RiskClassifier,
    now: DateTime<Utc>,
) -> ConflictGroup {
    let mut dated: Vec<(&ChangeRecord, DateTime<Utc>)> = partition
        .records
        .iter()
        .map(|r| (*r, r.effective_committed_at(now)))
        .collect();
    // sort_by is stable: ties keep first-encountered order
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    let newest = dated.first().map(|(_, at)| *at).unwrap_or(now);
    let oldest = dated.last().map(|(_, at)| *at).unwrap_or(now);
    let days_behind = whole_days_between(oldest, newest);

    let stories: Vec<StoryMember> = dated
        .iter()
        .enumerate()
        .map(|(i, (record, at))| StoryMember {
            story_id: record.story_id.clone(),
            developer: record.developer.clone(),
            committed_at: *at,
            date_defaulted: record.committed_at.is_none(),
            days_old: whole_days_between(*at, now),
            is_latest: i == 0,
        })
        .collect();

    let component_type = partition
        .records
        .iter()
        .find_map(|r| r.component_type.clone());
    let (risk_level, risk_score) = classifier.assess(stories.len(), days_behind);

    ConflictGroup {
        component_id: partition.component_id.to_string(),
        component_type,
        stories,
        days_behind,
        risk_level,
        risk_score,
    }
}

/// Group records into conflicts, in order of each component's first appearance.
pub fn group_conflicts(
    records: &[ChangeRecord],
    classifier: &RiskClassifier,
    now: DateTime<Utc>,
) -> Vec<ConflictGroup> {
    partition(records)
        .into_iter()
        .filter(|p| p.records.len() >= 2)
        .map(|p| build_group(p, classifier, now))
        .collect()
}
