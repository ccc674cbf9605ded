use crate::core::AnalysisResults;
use crate::developer::DeveloperReport;
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_developer_report(&mut self, report: &DeveloperReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// One JSON array rather than concatenated documents.
    fn write_developer_reports(&mut self, reports: &[DeveloperReport]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::fixtures::{sample_report, sample_results};
    use serde_json::Value;

    #[test]
    fn results_json_has_presentation_fields() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_results(&sample_results())
            .unwrap();
        let json: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["summary"]["conflictCount"], 2);
        assert_eq!(json["summary"]["highRisk"], 1);
        let first = &json["conflicts"][0];
        assert_eq!(first["componentId"], "AccountService");
        assert_eq!(first["riskLevel"], "HIGH");
        assert_eq!(first["daysBehind"], 9);
        assert_eq!(first["stories"][0]["isLatest"], true);
        assert_eq!(json["regressions"][0]["storyId"], "US-2");
    }

    #[test]
    fn developer_report_json_uses_status_labels() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_developer_report(&sample_report("Bob"))
            .unwrap();
        let json: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["developer"], "Bob");
        assert_eq!(json["stories"][0]["status"], "BLOCKED");
        assert_eq!(json["stories"][0]["storyId"], "US-2");
    }

    #[test]
    fn several_developer_reports_form_one_array() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_developer_reports(&[sample_report("Alice"), sample_report("Bob")])
            .unwrap();
        let json: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["developer"], "Bob");
    }
}
