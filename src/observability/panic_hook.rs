//! Custom panic hook for structured crash reports.
//!
//! The report names the analysis phase and input file active when the panic
//! happened, plus the innermost tracing span.

use super::context::{get_current_context, AnalysisContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 76;

/// Install the crash-report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();

    eprintln!();
    print_header();
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
}

fn rule(left: char, right: char) {
    eprintln!("{left}{}{right}", "═".repeat(WIDTH + 2));
}

fn row(text: &str) {
    eprintln!("║ {:<WIDTH$} ║", truncate(text, WIDTH));
}

fn print_header() {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    rule('╔', '╗');
    row("CONFLICTMAP CRASH REPORT");
    rule('╠', '╣');
    row(&format!("Version: {VERSION}"));
    row(&format!("Platform: {}", std::env::consts::OS));
    row(&format!("Time: {timestamp}"));
    rule('╠', '╣');
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    row(&format!("PANIC: {}", extract_panic_message(info)));
    if let Some(location) = info.location() {
        row(&format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }
}

fn print_context_section(context: &AnalysisContext) {
    rule('╠', '╣');
    row("OPERATION CONTEXT:");
    match &context.phase {
        Some(phase) => row(&format!("  Phase: {phase}")),
        None => row("  Phase: (not set, crash occurred before analysis started)"),
    }

    if let Some(metadata) = Span::current().metadata() {
        row(&format!("  Span: {}", metadata.name()));
    }

    if let Some(input) = &context.current_input {
        row(&format!("  Input: {}", input.display()));
    }
}

fn print_backtrace_section() {
    rule('╠', '╣');
    if std::env::var("RUST_BACKTRACE").is_ok() {
        row("STACK TRACE:");
        rule('╚', '╝');
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        row("Run with RUST_BACKTRACE=1 for stack trace");
        rule('╚', '╝');
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_untouched() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn long_strings_end_with_ellipsis() {
        let result = truncate("this is a long string that needs truncation", 20);
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let result = truncate("Überschreibung der Komponente", 10);
        assert_eq!(result, "Übersch...");
    }
}
