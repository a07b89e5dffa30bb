//! Reading delimited facility files into [`RecordSet`]s

use geoprox_core::{Error, RecordSet, Result};
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Extensions [`load_records`] can read
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn is_supported_file(path: impl AsRef<Path>) -> bool {
    extension(path.as_ref())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Load a `.csv`, `.tsv` or `.txt` file.
///
/// The header row becomes the column list. Bytes that are not valid UTF-8
/// are decoded as Latin-1.
pub fn load_records(path: impl AsRef<Path>) -> Result<RecordSet> {
    let path = path.as_ref();
    let delimiter = match extension(path).as_deref() {
        Some("csv") | Some("txt") => b',',
        Some("tsv") => b'\t',
        Some(ext @ ("xlsx" | "xls")) => {
            return Err(Error::UnsupportedFormat(format!(
                "{}: .{} spreadsheets must be exported to CSV first",
                path.display(),
                ext
            )))
        }
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "{}: unsupported extension {:?}",
                path.display(),
                other.unwrap_or("")
            )))
        }
    };

    let bytes = std::fs::read(path)?;
    let records = parse_delimited(&bytes, delimiter)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
    info!(
        "Loaded {} rows x {} columns from {}",
        records.len(),
        records.columns().len(),
        path.display()
    );
    Ok(records)
}

/// Parse delimited text with a header row
pub fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<RecordSet> {
    let text = decode(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(e.to_string()))?;
        rows.push(record.iter().map(infer_cell).collect());
    }

    Ok(RecordSet::new(columns, rows))
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("Input is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

/// Type a raw cell: blank is null, and text becomes a number only when the
/// number prints back as the same text. Codes with leading zeros, ids too
/// long for an exact number and values like `1.10` stay text.
pub fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    let number = match trimmed.parse::<i64>() {
        Ok(i) => Some(Number::from(i)),
        Err(_) => trimmed.parse::<f64>().ok().and_then(Number::from_f64),
    };
    match number {
        Some(n) if n.to_string() == trimmed => Value::Number(n),
        _ => Value::String(raw.to_string()),
    }
}
