//! CSV tokenizer for the restaurant dataset.
//!
//! Two modes are available:
//!
//! - [`TokenizerMode::LineSplit`] (default) splits on `\n` before any quote
//!   handling, so a line break inside a quoted value ends the row. Existing
//!   datasets were produced against this behavior.
//! - [`TokenizerMode::QuoteAware`] reads through the `csv` crate and keeps
//!   quoted line breaks inside the field.
//!
//! Both modes trim every field and drop rows with fewer than two fields or an
//! empty first field.

use std::io::Cursor;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{error::RowIssue, io_utils};

pub type RawRow = Vec<String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerMode {
    #[default]
    LineSplit,
    QuoteAware,
}

#[derive(Debug, Default, Clone)]
pub struct Tokenized {
    pub rows: Vec<RawRow>,
    pub dropped: Vec<RowIssue>,
}

pub fn tokenize(text: &str) -> Vec<RawRow> {
    tokenize_with(text, TokenizerMode::LineSplit).rows
}

pub fn tokenize_with(text: &str, mode: TokenizerMode) -> Tokenized {
    let candidates = match mode {
        TokenizerMode::LineSplit => text.split('\n').map(split_line).collect::<Vec<_>>(),
        TokenizerMode::QuoteAware => read_quote_aware(text),
    };

    let mut tokenized = Tokenized::default();
    for (line_idx, row) in candidates.into_iter().enumerate() {
        match check_row(&row) {
            Ok(()) => tokenized.rows.push(row),
            // Blank lines (trailing newline) are discarded without a report.
            Err(_) if is_blank(&row) => {}
            Err(issue) => {
                warn!("Dropping line {}: {issue}", line_idx + 1);
                tokenized.dropped.push(issue);
            }
        }
    }
    tokenized
}

/// Splits a single line into trimmed fields, honoring `"` quoting and `""`
/// escapes.
pub fn split_line(line: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if inside_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    inside_quotes = !inside_quotes;
                }
            }
            ',' if !inside_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn read_quote_aware(text: &str) -> Vec<RawRow> {
    let mut reader = io_utils::open_csv_reader(Cursor::new(text.as_bytes()), b',', false);
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(|f| f.trim().to_string()).collect()),
            Err(err) => warn!("Skipping unreadable record {}: {err}", idx + 1),
        }
    }
    rows
}

fn check_row(row: &[String]) -> Result<(), RowIssue> {
    if row.len() < 2 {
        return Err(RowIssue::TooFewFields);
    }
    if row[0].is_empty() {
        return Err(RowIssue::EmptyKey);
    }
    Ok(())
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|field| field.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> RawRow {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn quoted_field_keeps_commas_and_escaped_quotes() {
        let rows = tokenize("id,title\n1,\"Café, \"\"Nice\"\"\"");
        assert_eq!(rows, vec![row(&["id", "title"]), row(&["1", "Café, \"Nice\""])]);
    }

    #[test]
    fn fields_are_trimmed_including_carriage_returns() {
        let rows = tokenize("id , title \r\n 2 ,  Bistro \r\n");
        assert_eq!(rows, vec![row(&["id", "title"]), row(&["2", "Bistro"])]);
    }

    #[test]
    fn short_rows_and_empty_keys_are_dropped() {
        let tokenized =
            tokenize_with("id,title\nlonely\n,orphan\n3,Kept\n", TokenizerMode::LineSplit);
        assert_eq!(tokenized.rows.len(), 2);
        assert_eq!(tokenized.rows[1], row(&["3", "Kept"]));
        assert_eq!(
            tokenized.dropped,
            vec![RowIssue::TooFewFields, RowIssue::EmptyKey]
        );
    }

    #[test]
    fn line_split_mode_breaks_multiline_quoted_values() {
        let text = "id,title\n1,\"first line\nsecond line\"";
        let rows = tokenize(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&["1", "first line"]));
    }

    #[test]
    fn quote_aware_mode_keeps_multiline_quoted_values() {
        let text = "id,title\n1,\"first line\nsecond line\"\n";
        let tokenized = tokenize_with(text, TokenizerMode::QuoteAware);
        assert_eq!(tokenized.rows.len(), 2);
        assert_eq!(tokenized.rows[1], row(&["1", "first line\nsecond line"]));
    }

    #[test]
    fn quote_aware_mode_applies_the_same_row_guards() {
        let text = "id,title\n,ghost\n4,Real\n";
        let tokenized = tokenize_with(text, TokenizerMode::QuoteAware);
        assert_eq!(tokenized.rows, vec![row(&["id", "title"]), row(&["4", "Real"])]);
        assert_eq!(tokenized.dropped, vec![RowIssue::EmptyKey]);
    }

    #[test]
    fn unterminated_quote_swallows_rest_of_line() {
        assert_eq!(split_line("1,\"open, still open"), row(&["1", "open, still open"]));
    }
}
