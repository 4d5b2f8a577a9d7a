//! Record file readers used by `temporal-tree-cli`.
//!
//! Inputs are NDJSON (one object per line) or CSV with a header row, either
//! plain or gzip-compressed when the path ends in `.gz`. Each record keeps
//! only what the tree builders need: a leaf key and the raw timestamp.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use flate2::read::GzDecoder;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Ndjson,
    Csv,
}

/// One input record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Value of the key field, or the record number when there is none.
    pub key: String,
    /// Raw timestamp value; `None` when the field is absent or empty.
    pub ts: Option<Value>,
}

/// Read all records of `path`.
pub fn read_rows(
    path: &Path,
    format: InputFormat,
    key_field: Option<&str>,
    timestamp_field: Option<&str>,
) -> Result<Vec<Row>> {
    let reader = open_input(path)?;
    match format {
        InputFormat::Ndjson => read_ndjson(reader, key_field, timestamp_field),
        InputFormat::Csv => read_csv(reader, key_field, timestamp_field),
    }
}

pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("open input {}", path.display()))?;
    if path.extension().and_then(|ext| ext.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Blank lines are skipped; any other line must be a JSON object.
pub fn read_ndjson<R: Read>(
    reader: R,
    key_field: Option<&str>,
    timestamp_field: Option<&str>,
) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)
            .with_context(|| format!("parse json at line {}", line_no + 1))?;
        let Value::Object(mut object) = value else {
            bail!("line {}: expected a json object", line_no + 1);
        };

        let key = match key_field.and_then(|field| object.get(field)) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => rows.len().to_string(),
        };
        let ts = timestamp_field.and_then(|field| object.remove(field));
        rows.push(Row { key, ts });
    }
    Ok(rows)
}

/// Named columns must exist in the header row. Cells are trimmed.
pub fn read_csv<R: Read>(
    reader: R,
    key_field: Option<&str>,
    timestamp_field: Option<&str>,
) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| anyhow!("missing csv column {name}"))
    };
    let key_idx = key_field.map(column).transpose()?;
    let ts_idx = timestamp_field.map(column).transpose()?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let key = match key_idx.and_then(|idx| record.get(idx)) {
            Some(text) => text.to_string(),
            None => rows.len().to_string(),
        };
        let ts = ts_idx
            .and_then(|idx| record.get(idx))
            .filter(|text| !text.is_empty())
            .map(|text| Value::String(text.to_string()));
        rows.push(Row { key, ts });
    }
    Ok(rows)
}

/// Epoch milliseconds (number or digit string) or RFC 3339.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>> {
    let millis = match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| anyhow!("timestamp {number} is not an integer"))?,
        Value::String(text) => match text.parse::<i64>() {
            Ok(millis) => millis,
            Err(_) => {
                return DateTime::parse_from_rfc3339(text)
                    .map(|ts| ts.with_timezone(&Utc))
                    .with_context(|| format!("parse timestamp {text}"));
            }
        },
        other => bail!("unsupported timestamp value {other}"),
    };
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| anyhow!("timestamp {millis} out of range"))
}
