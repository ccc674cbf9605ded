// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod conflicts;
pub mod core;
pub mod developer;
pub mod formatting;
pub mod ingest;
pub mod io;
pub mod observability;
pub mod pipeline;
pub mod regression;
pub mod risk;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    AnalysisResults, AnalysisSummary, ChangeRecord, ConflictError, ConflictGroup, RegressionFlag,
    StoryMember,
};

pub use crate::config::ConflictmapConfig;

pub use crate::conflicts::group_conflicts;

pub use crate::developer::{
    build_all_developer_views, build_developer_view, DeveloperReport, DeveloperStoryView,
    StatusThresholds, StoryStatus,
};

pub use crate::ingest::{normalize, normalize_baseline, AliasTable, LogicalField};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::pipeline::{analyze, analyze_records};

pub use crate::regression::{detect_regressions, ProductionBaseline};

pub use crate::risk::{classify, risk_score, RiskClassifier, RiskLevel, RiskThresholds};
