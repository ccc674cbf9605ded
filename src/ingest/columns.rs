//! Logical-field to header-column resolution.
//!
//! Each logical field owns an ordered list of header aliases. Resolution runs
//! once per input: an exact pass over every field first, then a substring
//! pass for the fields still unresolved. Matching is case-sensitive.

use crate::core::{ConflictError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    StoryId,
    ComponentId,
    CommittedAt,
    Developer,
    ComponentType,
}

impl LogicalField {
    /// Resolution order. Earlier fields claim columns first.
    pub const ALL: [LogicalField; 5] = [
        Self::StoryId,
        Self::ComponentId,
        Self::CommittedAt,
        Self::Developer,
        Self::ComponentType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StoryId => "story_id",
            Self::ComponentId => "component_id",
            Self::CommittedAt => "committed_at",
            Self::Developer => "developer",
            Self::ComponentType => "component_type",
        }
    }

    fn builtin_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::StoryId => &[
                "User Story",
                "User Story Reference",
                "Story",
                "US",
                "Story Id",
                "storyId",
            ],
            Self::ComponentId => &[
                "Metadata API Name",
                "API Name",
                "Component",
                "Metadata",
                "Component Name",
                "componentId",
            ],
            Self::CommittedAt => &[
                "Last Modified Date",
                "Commit Date",
                "Date",
                "Modified",
                "committedAt",
            ],
            Self::Developer => &[
                "Developer",
                "Created By",
                "Last Modified By",
                "Owner",
                "Author",
            ],
            Self::ComponentType => &["Type", "Metadata Type", "Component Type"],
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered alias table, treated as configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(LogicalField, Vec<String>)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    pub fn builtin() -> Self {
        let entries = LogicalField::ALL
            .iter()
            .map(|field| {
                let aliases = field
                    .builtin_aliases()
                    .iter()
                    .map(|a| a.to_string())
                    .collect();
                (*field, aliases)
            })
            .collect();
        Self { entries }
    }

    /// Append aliases after the existing ones for `field`.
    pub fn with_extra_aliases<I, S>(mut self, field: LogicalField, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some((_, aliases)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            for alias in extra {
                let alias = alias.into();
                if !alias.is_empty() && !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            }
        }
        self
    }

    pub fn aliases(&self, field: LogicalField) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, a)| a.as_slice())
            .unwrap_or(&[])
    }

    /// Map every logical field to a header index.
    ///
    /// Fails with [`ConflictError::Schema`] naming every field in `required`
    /// that could not be resolved.
    pub fn resolve(&self, headers: &[String], required: &[LogicalField]) -> Result<ColumnMap> {
        let mut claimed = vec![false; headers.len()];
        let mut map = ColumnMap::default();

        // Every exact match is claimed before any substring match, so a loose
        // alias cannot take a column another field names exactly.
        for (field, aliases) in &self.entries {
            if let Some(i) = find_exact(headers, aliases, &claimed) {
                claimed[i] = true;
                map.set(*field, i);
            }
        }
        for (field, aliases) in &self.entries {
            if map.get(*field).is_some() {
                continue;
            }
            if let Some(i) = find_containing(headers, aliases, &claimed) {
                claimed[i] = true;
                map.set(*field, i);
            }
        }

        let missing: Vec<LogicalField> = required
            .iter()
            .copied()
            .filter(|f| map.get(*f).is_none())
            .collect();
        if missing.is_empty() {
            Ok(map)
        } else {
            Err(ConflictError::schema(missing))
        }
    }
}

fn find_exact(headers: &[String], aliases: &[String], claimed: &[bool]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .enumerate()
            .position(|(i, h)| !claimed[i] && h == alias)
    })
}

fn find_containing(headers: &[String], aliases: &[String], claimed: &[bool]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .enumerate()
            .position(|(i, h)| !claimed[i] && h.contains(alias.as_str()))
    })
}

/// Resolved header index per logical field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    story_id: Option<usize>,
    component_id: Option<usize>,
    committed_at: Option<usize>,
    developer: Option<usize>,
    component_type: Option<usize>,
}

impl ColumnMap {
    pub fn get(&self, field: LogicalField) -> Option<usize> {
        match field {
            LogicalField::StoryId => self.story_id,
            LogicalField::ComponentId => self.component_id,
            LogicalField::CommittedAt => self.committed_at,
            LogicalField::Developer => self.developer,
            LogicalField::ComponentType => self.component_type,
        }
    }

    fn set(&mut self, field: LogicalField, index: usize) {
        let slot = match field {
            LogicalField::StoryId => &mut self.story_id,
            LogicalField::ComponentId => &mut self.component_id,
            LogicalField::CommittedAt => &mut self.committed_at,
            LogicalField::Developer => &mut self.developer,
            LogicalField::ComponentType => &mut self.component_type,
        };
        *slot = Some(index);
    }

    /// Non-empty cell for `field` in `row`.
    pub fn cell<'r>(&self, row: &'r [String], field: LogicalField) -> Option<&'r str> {
        self.get(field)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    const REQUIRED: &[LogicalField] = &[LogicalField::StoryId, LogicalField::ComponentId];

    #[test]
    fn exact_match_wins_over_earlier_substring() {
        let table = AliasTable::builtin();
        let cols = headers(&["Story Points", "User Story", "Metadata API Name"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        assert_eq!(map.get(LogicalField::StoryId), Some(1));
        assert_eq!(map.get(LogicalField::ComponentId), Some(2));
    }

    #[test]
    fn substring_fallback_resolves_decorated_headers() {
        let table = AliasTable::builtin();
        let cols = headers(&["Copado User Story Name", "Component Full Name", "Commit Date (UTC)"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        assert_eq!(map.get(LogicalField::StoryId), Some(0));
        assert_eq!(map.get(LogicalField::ComponentId), Some(1));
        assert_eq!(map.get(LogicalField::CommittedAt), Some(2));
        assert_eq!(map.get(LogicalField::Developer), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let table = AliasTable::builtin();
        let cols = headers(&["user story", "metadata api name"]);
        let err = table.resolve(&cols, REQUIRED).unwrap_err();
        match err {
            ConflictError::Schema { missing } => {
                assert_eq!(missing, vec![LogicalField::StoryId, LogicalField::ComponentId])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn claimed_column_is_not_reused() {
        let table = AliasTable::builtin();
        // "Metadata Type" would satisfy the component "Metadata" substring,
        // but the exact "Component" header is taken first.
        let cols = headers(&["Story", "Component", "Metadata Type"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        assert_eq!(map.get(LogicalField::ComponentId), Some(1));
        assert_eq!(map.get(LogicalField::ComponentType), Some(2));
    }

    #[test]
    fn exact_developer_header_beats_substring_date_alias() {
        let table = AliasTable::builtin();
        // "Modified" is a substring date alias, "Last Modified By" an exact
        // developer alias.
        let cols = headers(&["User Story", "Metadata API Name", "Last Modified By"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        assert_eq!(map.get(LogicalField::Developer), Some(2));
        assert_eq!(map.get(LogicalField::CommittedAt), None);
    }

    #[test]
    fn extra_aliases_extend_builtin_table() {
        let table = AliasTable::builtin()
            .with_extra_aliases(LogicalField::StoryId, ["Ticket"])
            .with_extra_aliases(LogicalField::ComponentId, vec!["Artifact".to_string()]);
        let cols = headers(&["Ticket", "Artifact"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        assert_eq!(map.get(LogicalField::StoryId), Some(0));
        assert_eq!(map.get(LogicalField::ComponentId), Some(1));
        assert_eq!(table.aliases(LogicalField::StoryId).last().unwrap(), "Ticket");
    }

    #[test]
    fn cell_skips_blank_values() {
        let table = AliasTable::builtin();
        let cols = headers(&["User Story", "Component", "Developer"]);
        let map = table.resolve(&cols, REQUIRED).unwrap();
        let row = headers(&["US-1", "ClassA", ""]);
        assert_eq!(map.cell(&row, LogicalField::StoryId), Some("US-1"));
        assert_eq!(map.cell(&row, LogicalField::Developer), None);
        assert_eq!(map.cell(&row, LogicalField::ComponentType), None);
    }
}
