use crate::core::{AnalysisResults, ConflictGroup};
use crate::developer::{DeveloperReport, StoryStatus};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &AnalysisResults) -> anyhow::Result<()>> = vec![
            |w, r| w.write_header(r),
            |w, r| w.write_summary(r),
            |w, r| w.write_conflicts(r),
            |w, r| w.write_regressions(r),
        ];

        writers.iter().try_for_each(|writer| writer(self, results))
    }

    fn write_developer_report(&mut self, report: &DeveloperReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Deployment Plan: {}", cell(&report.developer))?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} blocked, {} need review, {} safe",
            report.count(StoryStatus::Blocked),
            report.count(StoryStatus::Warning),
            report.count(StoryStatus::Safe)
        )?;

        for story in &report.stories {
            writeln!(self.writer)?;
            writeln!(self.writer, "## {} ({})", cell(&story.story_id), story.status)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "- Reason: {}", story.reason)?;
            writeln!(self.writer, "- Components: {}", story.components.join(", "))?;
            if !story.other_developers.is_empty() {
                writeln!(
                    self.writer,
                    "- Coordinate with: {}",
                    story.other_developers.join(", ")
                )?;
            }
            writeln!(self.writer)?;
            for (i, action) in story.actions.iter().enumerate() {
                writeln!(self.writer, "{}. {}", i + 1, action)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "# Metadata Conflict Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            results.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let s = &results.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        let rows = [
            ("Records", s.total_records),
            ("User Stories", s.unique_stories),
            ("Components", s.unique_components),
            ("Conflicts", s.conflict_count),
            ("High Risk", s.high_risk),
            ("Medium Risk", s.medium_risk),
            ("Low Risk", s.low_risk),
            ("Regressions", s.regression_count),
            ("Stories With Regressions", s.stories_with_regressions),
        ];
        for (label, value) in rows {
            writeln!(self.writer, "| {label} | {value} |")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_conflicts(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "## Conflicts")?;
        writeln!(self.writer)?;
        if results.conflicts.is_empty() {
            writeln!(self.writer, "No component is touched by more than one story.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| Component | Type | Stories | Days Behind | Risk | Score | Latest |"
        )?;
        writeln!(
            self.writer,
            "|-----------|------|---------|-------------|------|-------|--------|"
        )?;
        for group in &results.conflicts {
            self.write_conflict_row(group)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_conflict_row(&mut self, group: &ConflictGroup) -> anyhow::Result<()> {
        let stories = group
            .stories
            .iter()
            .map(|s| match &s.developer {
                Some(dev) => format!("{} ({}, {}d)", s.story_id, dev, s.days_old),
                None => format!("{} ({}d)", s.story_id, s.days_old),
            })
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            self.writer,
            "| {} | {} | {} | {} | {} | {} | {} |",
            cell(&group.component_id),
            cell(group.component_type.as_deref().unwrap_or("-")),
            cell(&stories),
            group.days_behind,
            group.risk_level,
            group.risk_score,
            group
                .latest()
                .map(|s| cell(&s.story_id))
                .unwrap_or_default()
        )?;
        Ok(())
    }

    fn write_regressions(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        if results.regressions.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Regressions")?;
        writeln!(self.writer)?;
        for flag in &results.regressions {
            writeln!(self.writer, "- **{}**: {}", cell(&flag.story_id), flag.message)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
