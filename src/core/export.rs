//! Downloadable exports of visualization records.
//!
//! Charts export their rows as CSV, tables as CSV and pretty JSON, and
//! diagrams as raw Mermaid source. [`bundle`] packs any set of exports into
//! a single zip archive.

use crate::domain::model::{Row, VisualizationRecord};
use crate::utils::error::{HookError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const BUNDLE_FILENAME: &str = "visualizations.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: Vec<u8>,
}

/// Title turned into something safe to use as a file name.
pub fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "visualization".to_string()
    } else {
        stem
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn rows_to_csv(headers: &[&str], rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|key| cell(row.get(*key))))?;
    }
    writer
        .into_inner()
        .map_err(|e| HookError::IoError(e.into_error()))
}

pub fn export_record(record: &VisualizationRecord) -> Result<Vec<ExportFile>> {
    let stem = file_stem(record.title());

    let files = match record {
        VisualizationRecord::Chart(chart) => {
            // 欄位以第一列為準
            let headers: Vec<&str> = chart
                .data
                .first()
                .map(|row| row.keys().map(String::as_str).collect())
                .unwrap_or_default();
            vec![ExportFile {
                filename: format!("{}.csv", stem),
                contents: rows_to_csv(&headers, &chart.data)?,
            }]
        }
        VisualizationRecord::Table(table) => {
            let headers: Vec<&str> = table.columns.iter().map(|c| c.key.as_str()).collect();
            vec![
                ExportFile {
                    filename: format!("{}.csv", stem),
                    contents: rows_to_csv(&headers, &table.data)?,
                },
                ExportFile {
                    filename: format!("{}.json", stem),
                    contents: serde_json::to_vec_pretty(&table.data)?,
                },
            ]
        }
        VisualizationRecord::Diagram(diagram) => vec![ExportFile {
            filename: format!("{}.mmd", stem),
            contents: diagram.diagram.clone().into_bytes(),
        }],
    };

    Ok(files)
}

/// Exports for every record. A file name that is already taken gets the
/// first free `-2`, `-3`, ... suffix before the extension.
pub fn export_all(records: &[VisualizationRecord]) -> Result<Vec<ExportFile>> {
    let mut issued: HashSet<String> = HashSet::new();
    let mut files = Vec::new();

    for record in records {
        for mut file in export_record(record)? {
            if issued.contains(&file.filename) {
                file.filename = free_name(&file.filename, &issued);
            }
            issued.insert(file.filename.clone());
            files.push(file);
        }
    }

    tracing::debug!("Prepared {} export file(s)", files.len());
    Ok(files)
}

fn free_name(filename: &str, issued: &HashSet<String>) -> String {
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (filename, None),
    };

    (2..)
        .map(|n| match ext {
            Some(ext) => format!("{}-{}.{}", stem, n, ext),
            None => format!("{}-{}", stem, n),
        })
        .find(|candidate| !issued.contains(candidate))
        .unwrap_or_else(|| filename.to_string())
}

pub fn bundle(files: &[ExportFile]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for file in files {
        zip.start_file::<_, ()>(file.filename.as_str(), FileOptions::default())?;
        zip.write_all(&file.contents)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
