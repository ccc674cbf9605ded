use crate::core::{AnalysisResults, ConflictGroup};
use crate::developer::{DeveloperReport, DeveloperStoryView, StoryStatus};
use crate::formatting::OutputFormatter;
use crate::io::output::OutputWriter;
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────";

pub struct TerminalWriter<W: Write> {
    writer: W,
    fmt: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, fmt: Box<dyn OutputFormatter>) -> Self {
        Self { writer, fmt }
    }

    fn write_banner(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.fmt.header(RULE))?;
        writeln!(self.writer, "{}", self.fmt.header(&format!("  {title}")))?;
        writeln!(self.writer, "{}", self.fmt.header(RULE))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let s = &results.summary;
        writeln!(self.writer, "{}", self.fmt.bold("Summary"))?;
        writeln!(self.writer, "{THIN_RULE}")?;
        writeln!(
            self.writer,
            "Records: {}  Stories: {}  Components: {}",
            s.total_records, s.unique_stories, s.unique_components
        )?;
        writeln!(
            self.writer,
            "Conflicts: {} ({} {}, {} {}, {} {})",
            s.conflict_count,
            s.high_risk,
            self.fmt.risk(crate::risk::RiskLevel::High),
            s.medium_risk,
            self.fmt.risk(crate::risk::RiskLevel::Medium),
            s.low_risk,
            self.fmt.risk(crate::risk::RiskLevel::Low),
        )?;
        writeln!(
            self.writer,
            "Regressions: {} across {} stories",
            s.regression_count, s.stories_with_regressions
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_conflict(&mut self, group: &ConflictGroup) -> anyhow::Result<()> {
        let kind = group
            .component_type
            .as_deref()
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        writeln!(
            self.writer,
            "{} {}{}  {} stories, {} days behind, score {}",
            self.fmt.risk(group.risk_level),
            self.fmt.bold(&group.component_id),
            self.fmt.dim(&kind),
            group.story_count(),
            group.days_behind,
            group.risk_score
        )?;
        for member in &group.stories {
            let marker = if member.is_latest { "*" } else { " " };
            let developer = member.developer.as_deref().unwrap_or("unassigned");
            let age = if member.date_defaulted {
                "no commit date".to_string()
            } else {
                format!("{} days old", member.days_old)
            };
            writeln!(
                self.writer,
                "  {marker} {} {}",
                member.story_id,
                self.fmt.dim(&format!("({developer}, {age})"))
            )?;
        }
        Ok(())
    }

    fn write_story(&mut self, story: &DeveloperStoryView) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}  {}",
            self.fmt.status(story.status),
            self.fmt.bold(&story.story_id),
            story.reason
        )?;
        writeln!(
            self.writer,
            "  {}",
            self.fmt.dim(&format!("components: {}", story.components.join(", ")))
        )?;
        if !story.other_developers.is_empty() {
            writeln!(
                self.writer,
                "  {}",
                self.fmt
                    .dim(&format!("coordinate with: {}", story.other_developers.join(", ")))
            )?;
        }
        for action in &story.actions {
            writeln!(self.writer, "  - {action}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        self.write_banner("METADATA CONFLICT REPORT")?;
        self.write_summary(results)?;

        if results.conflicts.is_empty() {
            writeln!(self.writer, "No conflicting components.")?;
        } else {
            writeln!(self.writer, "{}", self.fmt.bold("Conflicts"))?;
            writeln!(self.writer, "{THIN_RULE}")?;
            for group in &results.conflicts {
                self.write_conflict(group)?;
            }
        }

        if !results.regressions.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", self.fmt.bold("Regressions"))?;
            writeln!(self.writer, "{THIN_RULE}")?;
            for flag in &results.regressions {
                writeln!(self.writer, "  {} {}", flag.story_id, flag.message)?;
            }
        }
        Ok(())
    }

    fn write_developer_report(&mut self, report: &DeveloperReport) -> anyhow::Result<()> {
        self.write_banner(&format!("DEPLOYMENT PLAN: {}", report.developer))?;
        if report.stories.is_empty() {
            writeln!(self.writer, "No conflicts or regressions affect this developer.")?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "{} {}, {} {}, {} {}",
            report.count(StoryStatus::Blocked),
            self.fmt.status(StoryStatus::Blocked),
            report.count(StoryStatus::Warning),
            self.fmt.status(StoryStatus::Warning),
            report.count(StoryStatus::Safe),
            self.fmt.status(StoryStatus::Safe),
        )?;
        writeln!(self.writer)?;
        for story in &report.stories {
            self.write_story(story)?;
        }
        Ok(())
    }

    fn write_developer_reports(&mut self, reports: &[DeveloperReport]) -> anyhow::Result<()> {
        if reports.is_empty() {
            writeln!(self.writer, "No developer has a story affected by conflicts or regressions.")?;
        }
        for report in reports {
            self.write_developer_report(report)?;
        }
        Ok(())
    }
}
