use crate::core::AnalysisResults;
use crate::developer::DeveloperReport;
use crate::formatting::{formatter_for, FormattingConfig};
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }
}

/// Presentation collaborator: renders analysis output, never mutates it.
pub trait OutputWriter {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()>;
    fn write_developer_report(&mut self, report: &DeveloperReport) -> anyhow::Result<()>;

    fn write_developer_reports(&mut self, reports: &[DeveloperReport]) -> anyhow::Result<()> {
        for report in reports {
            self.write_developer_report(report)?;
        }
        Ok(())
    }
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatter_for(formatting))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("terminal"), Some(OutputFormat::Terminal));
        assert_eq!(OutputFormat::parse("pdf"), None);
    }
}
