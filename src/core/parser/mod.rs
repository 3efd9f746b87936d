//! Turns raw segments into normalized visualization records.
//!
//! Parsing is permissive: fields of the wrong JSON type fall back to their
//! defaults and only a broken document, a non-object document or a missing
//! payload rejects the segment.

pub mod chart;
pub mod diagram;
pub mod table;

use crate::domain::model::{Kind, RawSegment, Row, VisualizationRecord};
use serde_json::{Map, Value};
use thiserror::Error;

pub use chart::DEFAULT_PALETTE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("invalid JSON in {kind} content: {message}")]
    InvalidJson { kind: Kind, message: String },

    #[error("{kind} content is not a JSON object")]
    NotAnObject { kind: Kind },

    #[error("{kind} content has an empty '{field}'")]
    EmptyPayload { kind: Kind, field: &'static str },
}

pub type ParseResult<T> = std::result::Result<T, ParseFailure>;

#[derive(Debug, Clone)]
pub struct Parser {
    palette: Vec<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

impl Parser {
    pub fn new(palette: Vec<String>) -> Self {
        Self { palette }
    }

    pub fn parse(&self, segment: &RawSegment) -> ParseResult<VisualizationRecord> {
        match segment.kind {
            Kind::Chart => {
                chart::parse(&segment.text, &self.palette).map(VisualizationRecord::Chart)
            }
            Kind::Table => table::parse(&segment.text).map(VisualizationRecord::Table),
            Kind::Diagram => diagram::parse(&segment.text).map(VisualizationRecord::Diagram),
        }
    }
}

pub(crate) fn parse_object(kind: Kind, text: &str) -> ParseResult<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(text.trim()).map_err(|e| ParseFailure::InvalidJson {
            kind,
            message: e.to_string(),
        })?;

    match value {
        Value::Object(object) => Ok(object),
        _ => Err(ParseFailure::NotAnObject { kind }),
    }
}

pub(crate) fn string_field(object: &Map<String, Value>, key: &str, default: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Object rows of the `key` array. Anything else in the array is dropped.
pub(crate) fn take_rows(object: &mut Map<String, Value>, key: &str) -> Vec<Row> {
    match object.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                other => {
                    tracing::debug!("Dropping non-object row: {}", other);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// `total_sales` -> `Total Sales`. A letter is upper-cased when it does not
/// follow another letter and lower-cased otherwise.
pub fn humanize_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut after_letter = false;

    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            label.push(c);
            after_letter = false;
        }
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("value"), "Value");
        assert_eq!(humanize_key("total_sales"), "Total Sales");
        assert_eq!(humanize_key("revenueQ1"), "Revenueq1");
        assert_eq!(humanize_key("q1sales"), "Q1Sales");
        assert_eq!(humanize_key("UNIT_PRICE"), "Unit Price");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn test_parse_object_rejects_garbage() {
        let err = parse_object(Kind::Table, "{not json").unwrap_err();
        assert!(matches!(err, ParseFailure::InvalidJson { kind: Kind::Table, .. }));

        let err = parse_object(Kind::Chart, "[1, 2, 3]").unwrap_err();
        assert_eq!(err, ParseFailure::NotAnObject { kind: Kind::Chart });

        assert!(parse_object(Kind::Chart, "\n  {\"a\": 1}  \n").is_ok());
    }

    #[test]
    fn test_take_rows_keeps_only_objects() {
        let mut object = parse_object(
            Kind::Chart,
            r#"{"data": [{"name": "a"}, 3, "x", {"name": "b"}]}"#,
        )
        .unwrap();

        let rows = take_rows(&mut object, "data");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "b");

        let mut object = parse_object(Kind::Chart, r#"{"data": "nope"}"#).unwrap();
        assert!(take_rows(&mut object, "data").is_empty());
    }

    #[test]
    fn test_string_field_falls_back_on_wrong_type() {
        let object = parse_object(Kind::Chart, r#"{"title": 42, "description": "d"}"#).unwrap();
        assert_eq!(string_field(&object, "title", "Chart"), "Chart");
        assert_eq!(string_field(&object, "description", ""), "d");
        assert_eq!(string_field(&object, "missing", "x"), "x");
    }

    #[test]
    fn test_parser_routes_by_kind() {
        let parser = Parser::default();
        let segment = RawSegment {
            kind: Kind::Diagram,
            text: r#"{"diagram": "graph LR\nA-->B"}"#.to_string(),
        };

        let record = parser.parse(&segment).unwrap();
        assert_eq!(record.kind(), Kind::Diagram);
        assert_eq!(record.title(), "Relationship Diagram");
    }
}
