use super::{humanize_key, parse_object, string_field, take_rows, ParseFailure, ParseResult};
use crate::domain::model::{Column, ColumnType, Kind, Row, TableRecord};
use serde_json::Value;
use std::collections::HashSet;

const CURRENCY_KEYS: &[&str] = &["salary", "price", "cost", "revenue", "amount"];
const URL_KEYS: &[&str] = &["url", "link", "website"];

pub fn parse(text: &str) -> ParseResult<TableRecord> {
    let mut object = parse_object(Kind::Table, text)?;
    let data = take_rows(&mut object, "data");

    let supplied = supplied_columns(object.get("columns"), data.first());
    let columns = if supplied.is_empty() {
        infer_columns(data.first())
    } else {
        supplied
    };

    if data.is_empty() {
        return Err(ParseFailure::EmptyPayload {
            kind: Kind::Table,
            field: "data",
        });
    }

    Ok(TableRecord {
        title: string_field(&object, "title", "Data Table"),
        description: string_field(&object, "description", ""),
        data,
        columns,
    })
}

/// Column type from the field name and the JSON type of its value.
pub fn infer_column_type(key: &str, value: &Value) -> ColumnType {
    let key = key.to_lowercase();
    match value {
        Value::Number(_) if CURRENCY_KEYS.contains(&key.as_str()) => ColumnType::Currency,
        Value::Number(_) => ColumnType::Number,
        Value::String(_) if key.contains("date") || key.contains("time") => ColumnType::Date,
        Value::String(_) if key == "email" => ColumnType::Email,
        Value::String(_) if URL_KEYS.contains(&key.as_str()) => ColumnType::Url,
        _ => ColumnType::Text,
    }
}

/// One column per key of the first row, in that row's key order.
pub fn infer_columns(first_row: Option<&Row>) -> Vec<Column> {
    let Some(row) = first_row else {
        return Vec::new();
    };

    row.iter()
        .map(|(key, value)| Column {
            key: key.clone(),
            label: humanize_key(key),
            column_type: infer_column_type(key, value),
        })
        .collect()
}

fn supplied_columns(value: Option<&Value>, first_row: Option<&Row>) -> Vec<Column> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for entry in entries {
        let Some(key) = entry.get("key").and_then(Value::as_str) else {
            tracing::debug!("Ignoring column entry without key: {}", entry);
            continue;
        };
        if !seen.insert(key.to_string()) {
            continue;
        }

        let label = entry
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| humanize_key(key));

        // 型別缺少或無法辨識時，以第一列的值推斷
        let column_type = entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(ColumnType::from_label)
            .or_else(|| {
                first_row
                    .and_then(|row| row.get(key))
                    .map(|value| infer_column_type(key, value))
            })
            .unwrap_or(ColumnType::Text);

        columns.push(Column {
            key: key.to_string(),
            label,
            column_type,
        });
    }
    columns
}
