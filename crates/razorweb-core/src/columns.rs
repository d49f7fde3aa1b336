//! Table column definitions, cell projection and sorting

use crate::models::TransactionRecord;
use crate::time::format_timestamp;
use razorweb_config::Config;
use serde::{Deserialize, Serialize};

/// Formatting options shared by every projection
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Glyph prefixed to amounts
    pub currency_symbol: String,
    /// Offset for timestamps, minutes east of UTC
    pub utc_offset_minutes: i32,
    /// chrono format for timestamps
    pub datetime_format: String,
    /// Sort amount and captured date by raw value
    pub numeric_sort: bool,
}

impl DisplayOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency_symbol: config.display.currency_symbol.clone(),
            utc_offset_minutes: config.display.utc_offset_minutes,
            datetime_format: config.display.datetime_format.clone(),
            numeric_sort: config.table.numeric_sort,
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Amount,
    CapturedAt,
    OrderId,
    Method,
    Email,
    Contact,
    Address,
    City,
    Country,
    Name,
    PanNumber,
    PinCode,
}

impl Column {
    /// Every column in display order
    pub const ALL: [Column; 13] = [
        Column::Id,
        Column::Amount,
        Column::CapturedAt,
        Column::OrderId,
        Column::Method,
        Column::Email,
        Column::Contact,
        Column::Address,
        Column::City,
        Column::Country,
        Column::Name,
        Column::PanNumber,
        Column::PinCode,
    ];

    /// Stable id used in query strings
    pub fn id(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Amount => "amount",
            Column::CapturedAt => "captured_at",
            Column::OrderId => "order_id",
            Column::Method => "method",
            Column::Email => "email",
            Column::Contact => "contact",
            Column::Address => "address",
            Column::City => "city",
            Column::Country => "country",
            Column::Name => "name",
            Column::PanNumber => "pan_number",
            Column::PinCode => "pin_code",
        }
    }

    /// Header label
    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "Id",
            Column::Amount => "amount",
            Column::CapturedAt => "Captured Date",
            Column::OrderId => "order_id",
            Column::Method => "method",
            // Shows the email address despite the label
            Column::Email => "F.Name",
            Column::Contact => "contact",
            Column::Address => "address",
            Column::City => "city",
            Column::Country => "country",
            Column::Name => "Name",
            Column::PanNumber => "pan_number",
            Column::PinCode => "pin_code",
        }
    }

    /// Minimum CSS width of the column
    pub fn width(&self) -> &'static str {
        match self {
            Column::Id | Column::Amount | Column::CapturedAt => "4rem",
            Column::OrderId | Column::Method | Column::City | Column::PinCode => "5rem",
            Column::PanNumber => "6rem",
            Column::Contact | Column::Address => "7rem",
            Column::Email | Column::Country | Column::Name => "10rem",
        }
    }

    pub fn is_sortable(&self) -> bool {
        true
    }

    pub fn is_reorderable(&self) -> bool {
        matches!(self, Column::Email)
    }

    /// Columns that can sort by raw value when `numeric_sort` is on
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Amount | Column::CapturedAt)
    }

    /// Displayed cell text. Missing fields render as an empty string.
    pub fn project(&self, record: &TransactionRecord, options: &DisplayOptions) -> String {
        match self {
            Column::Id => record.id().unwrap_or_default(),
            Column::Amount => record
                .amount()
                .map(|amount| format!("{}{}", options.currency_symbol, razorweb_utils::round_off(amount)))
                .unwrap_or_default(),
            Column::CapturedAt => record
                .captured_at()
                .and_then(|ts| format_timestamp(ts, options.utc_offset_minutes, &options.datetime_format))
                .unwrap_or_default(),
            Column::OrderId => record.order_id().unwrap_or_default(),
            Column::Method => record.method().unwrap_or_default(),
            Column::Email => record.email().unwrap_or_default(),
            Column::Contact => record.contact().unwrap_or_default(),
            Column::Address => record.note("address").unwrap_or_default(),
            Column::City => record.note("city").unwrap_or_default(),
            Column::Country => record.note("country").unwrap_or_default(),
            Column::Name => format!(
                "{} {}",
                record.first_name().unwrap_or_default(),
                record.last_name().unwrap_or_default()
            ),
            Column::PanNumber => record.note("pan_number").unwrap_or_default(),
            Column::PinCode => record.note("pin_code").unwrap_or_default(),
        }
    }

    fn raw_value(&self, record: &TransactionRecord) -> Option<i64> {
        match self {
            Column::Amount => record.amount(),
            Column::CapturedAt => record.captured_at(),
            _ => None,
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.id() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid column: {}", s))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Number(Option<i64>),
}

/// Stable sort by a column.
///
/// Columns compare their displayed text, so `"₹10.00"` sorts before `"₹9.00"`.
/// With `numeric_sort`, amount and captured date compare raw values instead.
pub fn sort_records(
    records: &mut Vec<TransactionRecord>,
    column: Column,
    direction: SortDirection,
    options: &DisplayOptions,
) {
    let numeric = options.numeric_sort && column.is_numeric();
    let mut keyed: Vec<(SortKey, TransactionRecord)> = records
        .drain(..)
        .map(|record| {
            let key = if numeric {
                SortKey::Number(column.raw_value(&record))
            } else {
                SortKey::Text(column.project(&record, options))
            };
            (key, record)
        })
        .collect();

    keyed.sort_by(|a, b| match direction {
        SortDirection::Asc => a.0.cmp(&b.0),
        SortDirection::Desc => b.0.cmp(&a.0),
    });

    records.extend(keyed.into_iter().map(|(_, record)| record));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> TransactionRecord {
        TransactionRecord::from_value(value).unwrap()
    }

    fn ids(records: &[TransactionRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().unwrap_or_default()).collect()
    }

    #[test]
    fn test_column_order_and_headers() {
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec![
                "Id", "amount", "Captured Date", "order_id", "method", "F.Name", "contact",
                "address", "city", "country", "Name", "pan_number", "pin_code"
            ]
        );
        assert!(Column::ALL.iter().all(|c| c.is_sortable()));
        assert_eq!(Column::ALL.iter().filter(|c| c.is_reorderable()).count(), 1);
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("captured_at".parse::<Column>().unwrap(), Column::CapturedAt);
        assert_eq!("PIN_CODE".parse::<Column>().unwrap(), Column::PinCode);
        assert!("notes".parse::<Column>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    }

    #[test]
    fn test_projection() {
        let options = DisplayOptions::default();
        let tx = record(json!({
            "id": "pay_1",
            "amount": 12345,
            "captured_at": 1700000000,
            "email": "ana@example.com",
            "notes": { "first_name": "Ana", "last_name": "Silva", "pin_code": "411001" }
        }));

        assert_eq!(Column::Amount.project(&tx, &options), "₹123.45");
        assert_eq!(Column::CapturedAt.project(&tx, &options), "11/15/2023, 3:43:20 AM");
        assert_eq!(Column::Email.project(&tx, &options), "ana@example.com");
        assert_eq!(Column::Name.project(&tx, &options), "Ana Silva");
        assert_eq!(Column::PinCode.project(&tx, &options), "411001");
    }

    #[test]
    fn test_projection_without_notes() {
        let options = DisplayOptions::default();
        let tx = record(json!({ "id": "pay_2" }));

        assert_eq!(Column::Amount.project(&tx, &options), "");
        assert_eq!(Column::City.project(&tx, &options), "");
        assert_eq!(Column::Name.project(&tx, &options), " ");

        let partial = record(json!({ "id": "pay_3", "notes": { "first_name": "Ana" } }));
        assert_eq!(Column::Name.project(&partial, &options), "Ana ");
    }

    #[test]
    fn test_amount_sorts_by_displayed_text() {
        let options = DisplayOptions::default();
        let mut records = vec![
            record(json!({ "id": "nine", "amount": 900 })),
            record(json!({ "id": "ten", "amount": 1000 })),
        ];

        sort_records(&mut records, Column::Amount, SortDirection::Asc, &options);
        // "₹10.00" < "₹9.00" lexically
        assert_eq!(ids(&records), vec!["ten", "nine"]);
    }

    #[test]
    fn test_amount_numeric_sort() {
        let options = DisplayOptions { numeric_sort: true, ..DisplayOptions::default() };
        let mut records = vec![
            record(json!({ "id": "ten", "amount": 1000 })),
            record(json!({ "id": "nine", "amount": 900 })),
            record(json!({ "id": "none" })),
        ];

        sort_records(&mut records, Column::Amount, SortDirection::Asc, &options);
        assert_eq!(ids(&records), vec!["none", "nine", "ten"]);

        sort_records(&mut records, Column::Amount, SortDirection::Desc, &options);
        assert_eq!(ids(&records), vec!["ten", "nine", "none"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let options = DisplayOptions::default();
        let mut records = vec![
            record(json!({ "id": "a", "method": "upi" })),
            record(json!({ "id": "b", "method": "card" })),
            record(json!({ "id": "c", "method": "upi" })),
        ];

        sort_records(&mut records, Column::Method, SortDirection::Desc, &options);
        assert_eq!(ids(&records), vec!["a", "c", "b"]);
    }
}
