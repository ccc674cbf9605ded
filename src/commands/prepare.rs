//! Input preparation shared by the analyze and developer commands.

use crate::cli::InputArgs;
use crate::config::{self, ConflictmapConfig};
use crate::core::AnalysisResults;
use crate::formatting::FormattingConfig;
use crate::ingest::parse_timestamp;
use crate::io::{self, create_writer, OutputFormat, OutputWriter};
use crate::observability::{set_current_input, set_phase, AnalysisPhase};
use crate::pipeline;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything an export-reading command needs, resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub deployment: PathBuf,
    pub baseline: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub as_of: Option<String>,
    pub config_path: Option<PathBuf>,
    pub plain: bool,
}

impl From<InputArgs> for RunConfig {
    fn from(args: InputArgs) -> Self {
        Self {
            deployment: args.deployment,
            baseline: args.baseline,
            format: args.format.map(Into::into),
            output: args.output,
            as_of: args.as_of,
            config_path: args.config,
            plain: args.plain,
        }
    }
}

/// Explicit config paths must load; otherwise discover from the working directory.
pub fn load_settings(explicit: Option<&Path>) -> Result<ConflictmapConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from_path(path)?),
        None => Ok(config::load_config()),
    }
}

/// The instant ages are measured against: `--as-of` when given, else now.
pub fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(raw) => parse_timestamp(raw)
            .with_context(|| format!("Unrecognized --as-of date '{raw}'")),
        None => Ok(Utc::now()),
    }
}

pub fn resolve_format(requested: Option<OutputFormat>, settings: &ConflictmapConfig) -> OutputFormat {
    requested
        .or_else(|| settings.default_format().and_then(OutputFormat::parse))
        .unwrap_or(OutputFormat::Terminal)
}

/// Colors only for an interactive stdout the user has not opted out of.
pub fn resolve_formatting(run: &RunConfig, settings: &ConflictmapConfig) -> FormattingConfig {
    if run.plain || run.output.is_some() {
        return FormattingConfig::plain();
    }
    let use_color = settings.output.as_ref().and_then(|o| o.use_color);
    FormattingConfig::from_env().with_preference(use_color)
}

fn read_input(path: &Path) -> Result<String> {
    let _input = set_current_input(path);
    let text = io::read_file(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read export");
    Ok(text)
}

/// Read both exports and run the full analysis.
pub fn run_analysis(run: &RunConfig, settings: &ConflictmapConfig) -> Result<AnalysisResults> {
    let now = resolve_now(run.as_of.as_deref())?;

    let (deployment, baseline) = {
        let _phase = set_phase(AnalysisPhase::Loading);
        let deployment = read_input(&run.deployment)?;
        let baseline = run.baseline.as_deref().map(read_input).transpose()?;
        (deployment, baseline)
    };

    let results = pipeline::analyze(&deployment, baseline.as_deref(), settings, now)
        .with_context(|| format!("Failed to analyze {}", run.deployment.display()))?;

    tracing::debug!(
        records = results.summary.total_records,
        conflicts = results.summary.conflict_count,
        regressions = results.summary.regression_count,
        "analysis complete"
    );
    Ok(results)
}

/// Writer for the chosen destination: a file when `output` is set, else stdout.
pub fn open_writer(
    run: &RunConfig,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match &run.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    Ok(create_writer(format, sink, formatting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;

    #[test]
    fn as_of_accepts_plain_dates() {
        let now = resolve_now(Some("2024-01-20")).unwrap();
        assert_eq!(now.to_rfc3339(), "2024-01-20T00:00:00+00:00");
        assert!(resolve_now(Some("next tuesday")).is_err());
    }

    #[test]
    fn format_falls_back_to_config_then_terminal() {
        let defaults = ConflictmapConfig::default();
        assert_eq!(resolve_format(None, &defaults), OutputFormat::Terminal);

        let md = parse_and_validate_config("[output]\ndefault_format = \"markdown\"\n").unwrap();
        assert_eq!(resolve_format(None, &md), OutputFormat::Markdown);
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &md),
            OutputFormat::Json
        );
    }

    #[test]
    fn file_output_is_never_colored() {
        let run = RunConfig {
            deployment: PathBuf::from("deploy.csv"),
            baseline: None,
            format: None,
            output: Some(PathBuf::from("report.txt")),
            as_of: None,
            config_path: None,
            plain: false,
        };
        let formatting = resolve_formatting(&run, &ConflictmapConfig::default());
        assert_eq!(formatting, FormattingConfig::plain());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_settings(Some(&missing)).is_err());
    }
}
