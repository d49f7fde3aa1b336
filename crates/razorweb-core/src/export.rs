//! Delimited-text export of the displayed records

use crate::columns::DisplayOptions;
use crate::error::{CoreError, CoreResult};
use crate::models::TransactionRecord;
use crate::time::format_in_offset;
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use razorweb_config::ExportConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub delimiter: u8,
    pub quote_fields: bool,
    pub filename_prefix: String,
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            delimiter: config.delimiter_byte(),
            quote_fields: config.quote_fields,
            filename_prefix: config.filename_prefix.clone(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

/// A finished export, ready to be downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// `data:` URI carrying the percent-encoded content
    pub fn data_uri(&self) -> String {
        format!("data:text/csv;charset=utf-8,{}", urlencoding::encode(&self.content))
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Serialize records using the first record's keys as the header row.
///
/// Returns `None` when there is nothing to export.
pub fn to_delimited(records: &[TransactionRecord], options: &ExportOptions) -> CoreResult<Option<String>> {
    let first = match records.first() {
        Some(first) if !first.fields().is_empty() => first,
        _ => return Ok(None),
    };
    let keys: Vec<&String> = first.fields().keys().collect();

    let quote_style = if options.quote_fields { QuoteStyle::Necessary } else { QuoteStyle::Never };
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(quote_style)
        .from_writer(Vec::new());

    let export_error = |e: csv::Error| CoreError::Export { message: e.to_string() };

    writer.write_record(keys.iter().map(|k| k.as_str())).map_err(export_error)?;
    for record in records {
        writer
            .write_record(keys.iter().map(|k| cell(record.get(k))))
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export { message: e.to_string() })?;
    let content = String::from_utf8(bytes).map_err(|e| CoreError::Export { message: e.to_string() })?;

    Ok(Some(content))
}

/// Download name: prefix, a space, the local timestamp, `.csv`
pub fn export_filename(prefix: &str, now: DateTime<Utc>, display: &DisplayOptions) -> String {
    format!(
        "{} {}.csv",
        prefix,
        format_in_offset(now, display.utc_offset_minutes, &display.datetime_format)
    )
}

/// Build a complete export, or `None` for an empty record list
pub fn build_export(
    records: &[TransactionRecord],
    options: &ExportOptions,
    display: &DisplayOptions,
    now: DateTime<Utc>,
) -> CoreResult<Option<CsvExport>> {
    Ok(to_delimited(records, options)?.map(|content| CsvExport {
        filename: export_filename(&options.filename_prefix, now, display),
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<TransactionRecord> {
        values.into_iter().map(|v| TransactionRecord::from_value(v).unwrap()).collect()
    }

    #[test]
    fn test_empty_list_exports_nothing() {
        assert_eq!(to_delimited(&[], &ExportOptions::default()).unwrap(), None);
        let now = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let export = build_export(&[], &ExportOptions::default(), &DisplayOptions::default(), now).unwrap();
        assert!(export.is_none());
    }

    #[test]
    fn test_first_record_keys_form_header() {
        let rows = records(vec![json!({"id": 1, "amount": 100}), json!({"id": 2, "amount": 200})]);
        let csv = to_delimited(&rows, &ExportOptions::default()).unwrap().unwrap();
        assert_eq!(csv, "id|amount\n1|100\n2|200\n");
    }

    #[test]
    fn test_heterogeneous_records_use_first_shape() {
        let rows = records(vec![
            json!({"id": "a", "status": "captured"}),
            json!({"id": "b", "extra": true}),
        ]);
        let csv = to_delimited(&rows, &ExportOptions::default()).unwrap().unwrap();
        assert_eq!(csv, "id|status\na|captured\nb|\n");
    }

    #[test]
    fn test_nested_notes_render_as_json() {
        let rows = records(vec![json!({"id": "a", "notes": {"city": "Pune"}})]);
        let csv = to_delimited(&rows, &ExportOptions::default()).unwrap().unwrap();
        assert_eq!(csv, "id|notes\na|\"{\"\"city\"\":\"\"Pune\"\"}\"\n");
    }

    #[test]
    fn test_delimiter_and_newline_are_quoted() {
        let rows = records(vec![json!({"id": "a|b", "address": "line 1\nline 2"})]);
        let csv = to_delimited(&rows, &ExportOptions::default()).unwrap().unwrap();
        assert_eq!(csv, "id|address\n\"a|b\"|\"line 1\nline 2\"\n");
    }

    #[test]
    fn test_unquoted_mode_writes_raw_values() {
        let options = ExportOptions { quote_fields: false, ..ExportOptions::default() };
        let rows = records(vec![json!({"id": "a|b", "contact": null})]);
        let csv = to_delimited(&rows, &options).unwrap().unwrap();
        assert_eq!(csv, "id|contact\na|b|\n");
    }

    #[test]
    fn test_filename_and_data_uri() {
        let now = DateTime::<Utc>::from_timestamp(1700000000, 0).unwrap();
        let rows = records(vec![json!({"id": 1, "amount": 100})]);
        let export = build_export(&rows, &ExportOptions::default(), &DisplayOptions::default(), now)
            .unwrap()
            .unwrap();

        assert_eq!(export.filename, "Student_Acedamic_Data 11/15/2023, 3:43:20 AM.csv");
        assert_eq!(export.data_uri(), "data:text/csv;charset=utf-8,id%7Camount%0A1%7C100%0A");
    }
}
