//! Input parsing for bulk loads.
//!
//! Both formats are reduced to a map of normalised field names to JSON values
//! and then read the same way:
//!   - names are trimmed, BOM-stripped and lowercased (`Title` == `title`);
//!   - list fields accept an array or a `;`-separated string;
//!   - `year` accepts a number or a numeric string.
//!
//! Title validation is left to `PublicationIn::into_record`.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use spacebio_common::PublicationIn;
use thiserror::Error;

use crate::error::{LoadError, Result};

/// Why a single row could not be turned into a payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("row is not a JSON object")]
    NotAnObject,

    #[error("malformed row: {0}")]
    Malformed(String),
}

pub type RowResult = std::result::Result<PublicationIn, RowError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// `.json` files are JSON, everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Read and parse a file, choosing the format from its extension.
pub async fn read_path(path: &Path) -> Result<Vec<RowResult>> {
    let content = tokio::fs::read_to_string(path).await?;
    parse(&content, InputFormat::from_path(path))
}

pub fn parse(content: &str, format: InputFormat) -> Result<Vec<RowResult>> {
    match format {
        InputFormat::Csv => parse_csv(content),
        InputFormat::Json => parse_json(content),
    }
}

pub fn parse_csv(content: &str) -> Result<Vec<RowResult>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(normalise_key).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                rows.push(Err(RowError::Malformed(e.to_string())));
                continue;
            }
        };
        let fields: HashMap<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.clone(), Value::String(v.to_string())))
            .collect();
        rows.push(build(&fields));
    }
    Ok(rows)
}

pub fn parse_json(content: &str) -> Result<Vec<RowResult>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(LoadError::NotAnArray),
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => {
                let fields: HashMap<String, Value> =
                    map.into_iter().map(|(k, v)| (normalise_key(&k), v)).collect();
                build(&fields)
            }
            _ => Err(RowError::NotAnObject),
        })
        .collect())
}

fn normalise_key(key: &str) -> String {
    key.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn build(fields: &HashMap<String, Value>) -> RowResult {
    Ok(PublicationIn {
        title: text(fields, "title"),
        abstract_text: text(fields, "abstract"),
        doi: text(fields, "doi"),
        year: year(fields)?,
        mission: text(fields, "mission"),
        repository: text(fields, "repository"),
        link: text(fields, "link"),
        summary: text(fields, "summary"),
        organisms: list(fields, "organisms"),
        hazards: list(fields, "hazards"),
        assays: list(fields, "assays"),
        outcomes: list(fields, "outcomes"),
        keywords: list(fields, "keywords"),
    })
}

fn text(fields: &HashMap<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list(fields: &HashMap<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::String(s)) => split_list(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Split a `;`-delimited cell, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn year(fields: &HashMap<String, Value>) -> std::result::Result<Option<i32>, RowError> {
    match fields.get("year") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .map(Some)
            .ok_or_else(|| RowError::InvalidYear(n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| RowError::InvalidYear(s.clone())),
        Some(other) => Err(RowError::InvalidYear(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_headers_are_case_insensitive_and_bom_stripped() {
        let csv = "\u{feff}Title,Link\nMicrogravity and bone,https://example.org/pmc1\n";
        let rows = parse_csv(csv).unwrap();
        let row = rows[0].clone().unwrap();
        assert_eq!(row.title.as_deref(), Some("Microgravity and bone"));
        assert_eq!(row.link.as_deref(), Some("https://example.org/pmc1"));
    }

    #[test]
    fn test_csv_lists_are_semicolon_split() {
        let csv = "title,organisms,hazards,year\nT, Mus musculus ; ;Rattus ,radiation,2020\n";
        let row = parse_csv(csv).unwrap().remove(0).unwrap();
        assert_eq!(row.organisms, vec!["Mus musculus".to_string(), "Rattus".to_string()]);
        assert_eq!(row.hazards, vec!["radiation".to_string()]);
        assert_eq!(row.year, Some(2020));
        assert!(row.assays.is_empty());
    }

    #[test]
    fn test_csv_invalid_year_is_a_row_error() {
        let csv = "title,year\nGood,2001\nBad,twenty\nBlank,\n";
        let rows = parse_csv(csv).unwrap();
        assert!(rows[0].is_ok());
        assert_eq!(rows[1], Err(RowError::InvalidYear("twenty".to_string())));
        assert_eq!(rows[2].as_ref().unwrap().year, None);
    }

    #[test]
    fn test_csv_missing_title_still_parses() {
        let rows = parse_csv("title,link\n,https://example.org\n").unwrap();
        assert_eq!(rows[0].as_ref().unwrap().title, None);
    }

    #[test]
    fn test_json_accepts_arrays_and_strings() {
        let json = r#"[
            {"Title": "A", "organisms": ["Mus musculus", " "], "year": "1999"},
            {"title": "B", "hazards": "radiation; isolation", "year": 2012},
            "not an object"
        ]"#;
        let rows = parse_json(json).unwrap();
        let a = rows[0].clone().unwrap();
        assert_eq!(a.organisms, vec!["Mus musculus".to_string()]);
        assert_eq!(a.year, Some(1999));
        let b = rows[1].clone().unwrap();
        assert_eq!(b.hazards, vec!["radiation".to_string(), "isolation".to_string()]);
        assert_eq!(b.year, Some(2012));
        assert_eq!(rows[2], Err(RowError::NotAnObject));
    }

    #[test]
    fn test_json_must_be_an_array() {
        assert!(matches!(parse_json(r#"{"title": "x"}"#), Err(LoadError::NotAnArray)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("pubs.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("SB_publication_PMC.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("noext")), InputFormat::Csv);
    }
}
