use crate::developer::StatusThresholds;
use crate::ingest::{AliasTable, LogicalField};
use crate::risk::RiskThresholds;
use serde::{Deserialize, Serialize};

/// Root configuration structure for conflictmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConflictmapConfig {
    /// Risk tier thresholds
    #[serde(default)]
    pub risk: Option<RiskThresholds>,

    /// Developer view status thresholds
    #[serde(default)]
    pub developer: Option<StatusThresholds>,

    /// Extra header aliases per logical field
    #[serde(default)]
    pub columns: Option<ColumnsConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl ConflictmapConfig {
    pub fn risk_thresholds(&self) -> RiskThresholds {
        self.risk.unwrap_or_default()
    }

    pub fn status_thresholds(&self) -> StatusThresholds {
        self.developer.unwrap_or_default()
    }

    /// Built-in alias table extended with any configured aliases.
    ///
    /// Configured aliases are appended, so built-in names keep priority.
    pub fn alias_table(&self) -> AliasTable {
        let Some(columns) = &self.columns else {
            return AliasTable::builtin();
        };
        LogicalField::ALL
            .iter()
            .fold(AliasTable::builtin(), |table, field| {
                table.with_extra_aliases(*field, columns.extra(*field).iter().cloned())
            })
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnsConfig {
    pub story_id: Vec<String>,
    pub component_id: Vec<String>,
    pub committed_at: Vec<String>,
    pub developer: Vec<String>,
    pub component_type: Vec<String>,
}

impl ColumnsConfig {
    pub fn extra(&self, field: LogicalField) -> &[String] {
        match field {
            LogicalField::StoryId => &self.story_id,
            LogicalField::ComponentId => &self.component_id,
            LogicalField::CommittedAt => &self.committed_at,
            LogicalField::Developer => &self.developer,
            LogicalField::ComponentType => &self.component_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
