use super::prepare::{self, RunConfig};
use crate::cli::InputArgs;
use crate::observability::{set_phase, AnalysisPhase};
use anyhow::Result;

pub struct AnalyzeConfig {
    pub run: RunConfig,
}

impl From<InputArgs> for AnalyzeConfig {
    fn from(args: InputArgs) -> Self {
        Self { run: args.into() }
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let span = tracing::info_span!("analyze", deployment = %config.run.deployment.display());
    let _enter = span.enter();

    let settings = prepare::load_settings(config.run.config_path.as_deref())?;
    let results = prepare::run_analysis(&config.run, &settings)?;

    if results.has_blocking_issues() {
        tracing::info!(
            high_risk = results.summary.high_risk,
            regressions = results.summary.regression_count,
            "blocking issues found"
        );
    }

    let _phase = set_phase(AnalysisPhase::OutputGeneration);
    let format = prepare::resolve_format(config.run.format, &settings);
    let formatting = prepare::resolve_formatting(&config.run, &settings);
    let mut writer = prepare::open_writer(&config.run, format, formatting)?;
    writer.write_results(&results)?;

    if let Some(path) = &config.run.output {
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
