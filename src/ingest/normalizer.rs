use super::columns::{AliasTable, ColumnMap, LogicalField};
use super::delimited::split_rows;
use super::timestamps::parse_timestamp;
use crate::core::{ChangeRecord, ConflictError, Result};

/// Which export a text blob represents. Determines the mandatory columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Story changes queued for deployment.
    Deployment,
    /// Component state already in production.
    Baseline,
}

impl InputKind {
    pub fn required_fields(&self) -> &'static [LogicalField] {
        match self {
            Self::Deployment => &[LogicalField::StoryId, LogicalField::ComponentId],
            Self::Baseline => &[LogicalField::ComponentId],
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Deployment => "deployment export",
            Self::Baseline => "production baseline",
        }
    }
}

/// Parse deployment-side export text into change records.
pub fn normalize(text: &str, aliases: &AliasTable) -> Result<Vec<ChangeRecord>> {
    normalize_as(text, aliases, InputKind::Deployment)
}

/// Parse production baseline text. Only the component column is mandatory.
pub fn normalize_baseline(text: &str, aliases: &AliasTable) -> Result<Vec<ChangeRecord>> {
    normalize_as(text, aliases, InputKind::Baseline)
}

pub fn normalize_as(text: &str, aliases: &AliasTable, kind: InputKind) -> Result<Vec<ChangeRecord>> {
    let mut rows = split_rows(text).into_iter();
    let headers = rows.next().unwrap_or_default();
    let columns = aliases.resolve(&headers, kind.required_fields())?;

    let records: Vec<ChangeRecord> = rows
        .filter_map(|row| build_record(&row, &columns, kind))
        .collect();

    if records.is_empty() {
        return Err(ConflictError::empty_input(kind.source_name()));
    }
    Ok(records)
}

fn build_record(row: &[String], columns: &ColumnMap, kind: InputKind) -> Option<ChangeRecord> {
    let component_id = columns.cell(row, LogicalField::ComponentId)?;
    let story_id = match kind {
        InputKind::Deployment => columns.cell(row, LogicalField::StoryId)?,
        InputKind::Baseline => columns.cell(row, LogicalField::StoryId).unwrap_or_default(),
    };

    Some(ChangeRecord {
        component_id: component_id.to_string(),
        story_id: story_id.to_string(),
        committed_at: columns
            .cell(row, LogicalField::CommittedAt)
            .and_then(parse_timestamp),
        developer: columns
            .cell(row, LogicalField::Developer)
            .map(str::to_string),
        component_type: columns
            .cell(row, LogicalField::ComponentType)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use indoc::indoc;

    #[test]
    fn normalizes_rows_with_all_fields() {
        let text = indoc! {"
            User Story,Metadata API Name,Last Modified Date,Developer,Type
            US-1,AccountService,2024-01-10,Alice,ApexClass
            US-2,AccountService,,Bob,ApexClass
        "};
        let records = normalize(text, &AliasTable::builtin()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].story_id, "US-1");
        assert_eq!(records[0].component_id, "AccountService");
        assert_eq!(
            records[0].committed_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(records[0].developer.as_deref(), Some("Alice"));
        assert_eq!(records[0].component_type.as_deref(), Some("ApexClass"));
        assert_eq!(records[1].committed_at, None);
    }

    #[test]
    fn drops_rows_missing_story_or_component() {
        let text = indoc! {"
            Story,Component
            US-1,ClassA
            ,ClassB
            US-3,
            US-4,ClassD
            ,
        "};
        let records = normalize(text, &AliasTable::builtin()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.story_id.as_str()).collect();
        assert_eq!(ids, vec!["US-1", "US-4"]);
    }

    #[test]
    fn missing_component_column_is_schema_error() {
        let text = "User Story,Owner\nUS-1,Alice\n";
        match normalize(text, &AliasTable::builtin()) {
            Err(ConflictError::Schema { missing }) => {
                assert_eq!(missing, vec![LogicalField::ComponentId])
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn header_without_usable_rows_is_empty_input() {
        let text = "User Story,Component\n,ClassA\nUS-1,\n";
        let err = normalize(text, &AliasTable::builtin()).unwrap_err();
        assert!(matches!(err, ConflictError::EmptyInput { .. }));
    }

    #[test]
    fn baseline_does_not_require_story_column() {
        let text = "Component,Last Modified Date\nClassA,2024-01-05\n";
        let records = normalize_baseline(text, &AliasTable::builtin()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].story_id, "");
        assert!(records[0].committed_at.is_some());
    }

    #[test]
    fn unparseable_dates_become_absent() {
        let text = "Story,Component,Date\nUS-1,ClassA,not a date\n";
        let records = normalize(text, &AliasTable::builtin()).unwrap();
        assert_eq!(records[0].committed_at, None);
    }
}
