//! CSV tokenizer for brokerage exports.
//!
//! Wraps the `csv` reader with the behavior bulk import needs: a UTF-8 BOM
//! is stripped, quoted fields and doubled-quote escapes are honored, any of
//! \r\n / \n / \r terminates a record, fully blank rows are dropped, and
//! rows are padded or truncated to the header width with a structured error
//! recorded for each truncation.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::Result;

/// Result of tokenizing a CSV document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCsv {
    /// Trimmed header cells from the first non-blank row.
    pub headers: Vec<String>,
    /// Data rows, each normalized to the header width.
    pub rows: Vec<Vec<String>>,
    /// Structural problems encountered while tokenizing.
    pub errors: Vec<ParseError>,
}

/// A problem encountered while tokenizing, tied to a row when possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub row_index: Option<usize>,
    pub message: String,
}

impl ParseError {
    fn new(row_index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            row_index,
            message: message.into(),
        }
    }
}

/// Tokenizes CSV text into headers and width-normalized data rows.
pub fn parse_csv(content: &str) -> Result<ParsedCsv> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut errors = Vec::new();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
                if row.iter().any(|cell| !cell.trim().is_empty()) {
                    records.push(row);
                }
            }
            Err(err) => {
                errors.push(ParseError::new(
                    Some(index),
                    format!("Failed to parse row {}: {}", index + 1, err),
                ));
            }
        }
    }

    if records.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "CSV file is empty or contains no valid records".to_string(),
        )));
    }

    let mut iter = records.into_iter();
    let headers: Vec<String> = iter
        .next()
        .unwrap_or_default()
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let header_count = headers.len();

    let rows: Vec<Vec<String>> = iter
        .enumerate()
        .map(|(index, mut row)| {
            if row.len() < header_count {
                row.resize(header_count, String::new());
            } else if row.len() > header_count {
                errors.push(ParseError::new(
                    Some(index),
                    format!(
                        "Row {} has {} columns, expected {}. Extra columns ignored.",
                        index + 1,
                        row.len(),
                        header_count
                    ),
                ));
                row.truncate(header_count);
            }
            row
        })
        .collect();

    Ok(ParsedCsv {
        headers,
        rows,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let result = parse_csv("Date,Action\n01/02/2026,Buy\n01/03/2026,Sell").unwrap();
        assert_eq!(result.headers, vec!["Date", "Action"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0], vec!["01/02/2026", "Buy"]);
    }

    #[test]
    fn test_quoted_fields_and_escaped_quotes() {
        let result = parse_csv("a,b\n\"hello, world\",\"say \"\"hi\"\"\"").unwrap();
        assert_eq!(result.rows[0], vec!["hello, world", "say \"hi\""]);
    }

    #[test]
    fn test_cr_and_crlf_line_endings() {
        let result = parse_csv("a,b\r\n1,2\r3,4\n5,6").unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[1], vec!["3", "4"]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let result = parse_csv("a,b\n1,2\n,\n\n3,4").unwrap();
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let result = parse_csv("\u{feff}a,b\n1,2").unwrap();
        assert_eq!(result.headers, vec!["a", "b"]);
    }

    #[test]
    fn test_short_rows_padded_long_rows_truncated() {
        let result = parse_csv("a,b,c\n1,2\n3,4,5,6").unwrap();
        assert_eq!(result.rows[0], vec!["1", "2", ""]);
        assert_eq!(result.rows[1], vec!["3", "4", "5"]);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(parse_csv("").is_err());
        assert!(parse_csv("\n\n").is_err());
    }

    #[test]
    fn test_multiline_quoted_field() {
        let result = parse_csv("a,b\n\"line1\nline2\",x").unwrap();
        assert_eq!(result.rows[0][0], "line1\nline2");
    }
}
