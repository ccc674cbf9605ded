use super::prepare::{self, RunConfig};
use crate::cli::InputArgs;
use crate::config::ConflictmapConfig;
use crate::core::AnalysisResults;
use crate::developer::{build_all_developer_views, build_developer_view, DeveloperReport};
use crate::observability::{set_phase, AnalysisPhase};
use anyhow::Result;

/// Whose plan to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeveloperTarget {
    Named(String),
    Everyone,
}

pub struct DeveloperConfig {
    pub run: RunConfig,
    pub target: DeveloperTarget,
}

impl DeveloperConfig {
    pub fn new(args: InputArgs, name: Option<String>, all: bool) -> Self {
        let target = match name {
            Some(name) if !all => DeveloperTarget::Named(name),
            _ => DeveloperTarget::Everyone,
        };
        Self {
            run: args.into(),
            target,
        }
    }
}

pub fn handle_developer(config: DeveloperConfig) -> Result<()> {
    let span = tracing::info_span!("developer", target = ?config.target);
    let _enter = span.enter();

    let settings = prepare::load_settings(config.run.config_path.as_deref())?;
    let results = prepare::run_analysis(&config.run, &settings)?;

    let reports = {
        let _phase = set_phase(AnalysisPhase::DeveloperViews);
        build_reports(&config.target, &results, &settings)
    };
    tracing::debug!(reports = reports.len(), "developer views built");

    let _phase = set_phase(AnalysisPhase::OutputGeneration);
    let format = prepare::resolve_format(config.run.format, &settings);
    let formatting = prepare::resolve_formatting(&config.run, &settings);
    let mut writer = prepare::open_writer(&config.run, format, formatting)?;
    match config.target {
        DeveloperTarget::Named(_) => {
            for report in &reports {
                writer.write_developer_report(report)?;
            }
        }
        DeveloperTarget::Everyone => writer.write_developer_reports(&reports)?,
    }
    Ok(())
}

fn build_reports(
    target: &DeveloperTarget,
    results: &AnalysisResults,
    settings: &ConflictmapConfig,
) -> Vec<DeveloperReport> {
    let thresholds = settings.status_thresholds();
    match target {
        DeveloperTarget::Named(developer) => {
            if !results.developers.iter().any(|d| d == developer) {
                tracing::warn!(
                    known = %results.developers.join(", "),
                    "developer {} does not appear in the export",
                    developer
                );
            }
            vec![DeveloperReport {
                developer: developer.clone(),
                stories: build_developer_view(
                    developer,
                    &results.conflicts,
                    &results.regressions,
                    &thresholds,
                ),
            }]
        }
        DeveloperTarget::Everyone => build_all_developer_views(
            &results.developers,
            &results.conflicts,
            &results.regressions,
            &thresholds,
        ),
    }
}
