use conflictmap::cli::{self, Commands};
use conflictmap::commands::{self, AnalyzeConfig, DeveloperConfig};
use conflictmap::observability::{init_tracing, install_panic_hook};
use conflictmap::ConflictError;
use std::process::ExitCode;

fn main() -> ExitCode {
    install_panic_hook();
    let cli = cli::parse_args();
    init_tracing(cli.command.verbosity());

    let outcome = match cli.command {
        Commands::Analyze { input } => commands::handle_analyze(AnalyzeConfig::from(input)),
        Commands::Developer { input, name, all } => {
            commands::handle_developer(DeveloperConfig::new(input, name, all))
        }
        Commands::Init { force } => commands::init_config(force),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print the full context chain, tagged with the stable code when an
/// analysis error sits somewhere in it.
fn report_error(err: &anyhow::Error) {
    match err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ConflictError>())
    {
        Some(cause) => eprintln!("Error: {err:#} [{}]", cause.code()),
        None => eprintln!("Error: {err:#}"),
    }
}
