//! Comma-delimited text splitting with double-quote handling.

use std::mem;

/// Split delimited text into rows of trimmed fields.
///
/// Quoted fields may contain commas, newlines and `""` escapes. A leading
/// byte-order mark is dropped and rows whose fields are all blank are skipped.
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(mem::take(&mut field));
                push_row(&mut rows, mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().all(|f| f.trim().is_empty()) {
        return;
    }
    rows.push(row.into_iter().map(|f| f.trim().to_string()).collect());
}
