//! Schema-less table records.
//!
//! A record keeps its columns in the order the server sent them, and every
//! value is reduced to one of four scalar shapes.

use crate::api::models::value_to_text;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl From<Value> for RecordValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RecordValue::String(s),
            Value::Number(n) => RecordValue::Number(n),
            Value::Bool(b) => RecordValue::Bool(b),
            Value::Null => RecordValue::Null,
            // Reference links and anything nested collapse to their display text
            other => RecordValue::String(value_to_text(other)),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::String(s) => write!(f, "{}", s),
            RecordValue::Number(n) => write!(f, "{}", n),
            RecordValue::Bool(b) => write!(f, "{}", b),
            RecordValue::Null => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, RecordValue>,
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name, RecordValue::from(value)))
                .collect(),
        }
    }
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&RecordValue> {
        self.fields.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text for a column; missing columns render empty
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Union of all columns, in order of first appearance across records
pub fn discover_columns(records: &[Record]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for record in records {
        seen.extend(record.columns());
    }
    seen.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_server_order() {
        let json = r#"{"number": "INC0010001", "active": true, "priority": 2, "closed_at": null, "caller_id": {"link": "x", "value": "6816f79c"}}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(
            columns,
            vec!["number", "active", "priority", "closed_at", "caller_id"]
        );
        assert_eq!(record.get("active"), Some(&RecordValue::Bool(true)));
        assert_eq!(record.get("closed_at"), Some(&RecordValue::Null));
        assert_eq!(record.display("priority"), "2");
        assert_eq!(record.display("caller_id"), "6816f79c");
        assert_eq!(record.display("missing"), "");
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_discover_columns_in_first_seen_order() {
        let first: Record = serde_json::from_str(r#"{"b": "1", "a": "2"}"#).unwrap();
        let second: Record = serde_json::from_str(r#"{"a": "3", "c": "4"}"#).unwrap();
        assert_eq!(discover_columns(&[first, second]), vec!["b", "a", "c"]);
        assert!(discover_columns(&[]).is_empty());
    }

    #[test]
    fn test_record_serializes_as_flat_object() {
        let record: Record = serde_json::from_str(r#"{"z": 1, "a": "x"}"#).unwrap();
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"z":1,"a":"x"}"#);
    }
}
