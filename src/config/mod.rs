//! `.conflictmap.toml` configuration.
//!
//! Every section is optional; missing values fall back to the documented
//! defaults (HIGH at 3+ stories and 5+ days, BLOCKED at score 80, WARNING at 60).

mod core;
mod loader;
pub mod validation;

pub use self::core::{ColumnsConfig, ConflictmapConfig, OutputConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::validate_config;

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# conflictmap configuration

[risk]
# Distinct stories on one component needed for HIGH risk (when also stale)
high_story_count = 3
# Day gap between newest and oldest commit that makes a conflict stale
stale_days = 5

[developer]
# Conflict score at or above which a story is BLOCKED
blocked_score = 80
# Conflict score at or above which a story needs review
warning_score = 60

[columns]
# Extra header names, tried after the built-in aliases
story_id = []
component_id = []
committed_at = []
developer = []
component_type = []

[output]
default_format = "terminal"
"#;
