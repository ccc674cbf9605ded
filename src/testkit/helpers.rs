//! Factory functions for test records and export text.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`at`] | Parse a date string into a UTC instant |
//! | [`record`] | Dated change record without developer |
//! | [`record_by`] | Dated change record with developer |
//! | [`record_undated`] | Change record with no commit date |
//! | [`export_csv`] | Render `(story, component, date, developer)` rows as export text |

use crate::core::ChangeRecord;
use crate::ingest::parse_timestamp;
use chrono::{DateTime, Utc};

/// Parse a timestamp accepted by the normalizer.
///
/// Panics on unparseable input so typos in fixtures fail loudly.
pub fn at(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or_else(|| panic!("test fixture date is not parseable: {raw:?}"))
}

pub fn record(story: &str, component: &str, date: &str) -> ChangeRecord {
    ChangeRecord::new(component, story).with_committed_at(at(date))
}

pub fn record_by(story: &str, component: &str, date: &str, developer: &str) -> ChangeRecord {
    record(story, component, date).with_developer(developer)
}

pub fn record_undated(story: &str, component: &str) -> ChangeRecord {
    ChangeRecord::new(component, story)
}

/// Render rows as a Copado-style export with a standard header.
pub fn export_csv(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut out = String::from("User Story,Metadata API Name,Last Modified Date,Developer\n");
    for (story, component, date, developer) in rows {
        out.push_str(&format!("{story},{component},{date},{developer}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_round_trips_through_normalizer() {
        let text = export_csv(&[("US-1", "ClassA", "2024-01-10", "Alice")]);
        let records =
            crate::ingest::normalize(&text, &crate::ingest::AliasTable::builtin()).unwrap();
        assert_eq!(records, vec![record_by("US-1", "ClassA", "2024-01-10", "Alice")]);
    }

    #[test]
    #[should_panic(expected = "not parseable")]
    fn bad_fixture_dates_panic() {
        at("tomorrow-ish");
    }
}
