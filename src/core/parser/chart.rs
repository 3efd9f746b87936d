use super::{humanize_key, parse_object, string_field, take_rows, ParseFailure, ParseResult};
use crate::domain::model::{ChartRecord, ChartType, Kind, Row, Series};
use serde_json::Value;
use std::collections::HashSet;

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D",
];

/// Category axis field, never treated as a series.
const LABEL_FIELD: &str = "name";

// 依序比對，第一個命中的規則決定圖表類型
const KEYWORD_RULES: &[(&[&str], ChartType)] = &[
    (
        &["time", "trend", "over time", "timeline", "monthly", "daily", "yearly"],
        ChartType::Line,
    ),
    (
        &["percentage", "proportion", "parts", "distribution", "share"],
        ChartType::Pie,
    ),
    (
        &["correlation", "scatter", "relationship", "vs", "against"],
        ChartType::Scatter,
    ),
];

pub fn parse(text: &str, palette: &[String]) -> ParseResult<ChartRecord> {
    let mut object = parse_object(Kind::Chart, text)?;
    let data = take_rows(&mut object, "data");

    let supplied = supplied_series(object.get("series"), palette);
    let series = if supplied.is_empty() {
        infer_series(data.first(), palette)
    } else {
        supplied
    };

    // 關鍵字比對用原始片段，不是解析後的標題
    let multi_series = series.len() > 1;
    let chart_type = select_chart_type(&text.to_lowercase());
    let available_types = available_types(chart_type, multi_series);

    if data.is_empty() {
        return Err(ParseFailure::EmptyPayload {
            kind: Kind::Chart,
            field: "data",
        });
    }

    Ok(ChartRecord {
        title: string_field(&object, "title", "Chart"),
        description: string_field(&object, "description", ""),
        data,
        x_axis_label: string_field(&object, "xAxisLabel", ""),
        y_axis_label: string_field(&object, "yAxisLabel", ""),
        series,
        chart_type,
        available_types,
    })
}

fn color_at(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
    } else {
        palette[index % palette.len()].clone()
    }
}

/// One series per numeric field of the first row, in key order. JSON
/// booleans are not numbers here.
pub fn infer_series(first_row: Option<&Row>, palette: &[String]) -> Vec<Series> {
    let Some(row) = first_row else {
        return Vec::new();
    };

    row.iter()
        .filter(|(key, value)| key.as_str() != LABEL_FIELD && value.is_number())
        .enumerate()
        .map(|(index, (key, _))| Series {
            key: key.clone(),
            name: humanize_key(key),
            color: color_at(palette, index),
        })
        .collect()
}

/// Series the model wrote itself. Entries without a string `key` are
/// skipped, gaps are filled in and repeated keys keep their first entry.
fn supplied_series(value: Option<&Value>, palette: &[String]) -> Vec<Series> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut series = Vec::new();
    for entry in entries {
        let Some(key) = entry.get("key").and_then(Value::as_str) else {
            tracing::debug!("Ignoring series entry without key: {}", entry);
            continue;
        };
        if !seen.insert(key.to_string()) {
            continue;
        }

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| humanize_key(key));
        let color = entry
            .get("color")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| color_at(palette, series.len()));

        series.push(Series {
            key: key.to_string(),
            name,
            color,
        });
    }
    series
}

pub fn select_chart_type(lowered: &str) -> ChartType {
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|word| lowered.contains(word)))
        .map(|(_, chart_type)| *chart_type)
        .unwrap_or(ChartType::Bar)
}

pub fn available_types(chart_type: ChartType, multi_series: bool) -> Vec<ChartType> {
    match chart_type {
        ChartType::Line => {
            let mut types = vec![ChartType::Line, ChartType::Area, ChartType::Bar];
            if multi_series {
                types.push(ChartType::StackedBar);
            }
            types
        }
        ChartType::Pie => vec![ChartType::Pie, ChartType::Donut, ChartType::Bar],
        ChartType::Scatter => vec![ChartType::Scatter, ChartType::Line],
        _ if multi_series => vec![
            ChartType::Bar,
            ChartType::GroupedBar,
            ChartType::StackedBar,
            ChartType::Line,
            ChartType::Area,
        ],
        _ => vec![ChartType::Bar, ChartType::Line, ChartType::Pie],
    }
}
