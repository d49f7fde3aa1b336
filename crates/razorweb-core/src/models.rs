//! Transaction records as returned by the payment gateway

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One payment event, kept exactly as the endpoint sent it.
///
/// The object is not validated: key order is preserved for export and every
/// accessor returns `None` when a field is missing or has an unusable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord(Map<String, Value>);

impl TransactionRecord {
    /// Wrap a JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// All fields in received order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Raw value of a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Identifier as display text; also the row key
    pub fn id(&self) -> Option<String> {
        display_text(self.0.get("id"))
    }

    /// Amount in minor currency units
    pub fn amount(&self) -> Option<i64> {
        integer(self.0.get("amount"))
    }

    /// Capture time, Unix seconds
    pub fn captured_at(&self) -> Option<i64> {
        integer(self.0.get("captured_at"))
    }

    pub fn order_id(&self) -> Option<String> {
        display_text(self.0.get("order_id"))
    }

    pub fn method(&self) -> Option<String> {
        display_text(self.0.get("method"))
    }

    pub fn email(&self) -> Option<String> {
        display_text(self.0.get("email"))
    }

    pub fn contact(&self) -> Option<String> {
        display_text(self.0.get("contact"))
    }

    pub fn status(&self) -> Option<String> {
        display_text(self.0.get("status"))
    }

    /// Free-form notes object. The gateway sends `[]` when there are none.
    pub fn notes(&self) -> Option<&Map<String, Value>> {
        self.0.get("notes").and_then(Value::as_object)
    }

    /// A field of the notes object
    pub fn note(&self, key: &str) -> Option<String> {
        display_text(self.notes()?.get(key))
    }

    pub fn first_name(&self) -> Option<String> {
        self.note("first_name")
    }

    pub fn last_name(&self) -> Option<String> {
        self.note("last_name")
    }
}

/// Render a scalar as text. `null` and missing fields are `None`; nested
/// values are rendered as compact JSON.
pub fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Body sent to the transaction endpoint. Dates are passed through as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub from: String,
    pub to: String,
}

/// Body returned by the transaction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub items: Vec<TransactionRecord>,
}

/// One line of the summary list shown under the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub amount: String,
    pub status: String,
}

impl From<&TransactionRecord> for RecordSummary {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: record.id().unwrap_or_default(),
            amount: record.amount().map(razorweb_utils::round_off).unwrap_or_default(),
            status: record.status().unwrap_or_default(),
        }
    }
}
