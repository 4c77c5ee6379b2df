//! Wire models for the ServiceNow table API.
//!
//! The table API is loose about types: booleans and numbers usually come
//! back as strings, and reference columns come back as `{link, value}`
//! objects unless display values were requested. The deserializers below
//! normalize those shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Flatten any JSON value to the text the API would display for it
pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(mut map) => {
            // NOTE: reference columns carry display_value when sysparm_display_value=all
            match map
                .remove("display_value")
                .or_else(|| map.remove("value"))
            {
                Some(inner) => value_to_text(inner),
                None => Value::Object(map).to_string(),
            }
        }
        other @ Value::Array(_) => other.to_string(),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserialize_text(deserializer)?;
    if text.is_empty() { Ok(None) } else { Ok(Some(text)) }
}

/// Accepts true/false, "true"/"false" and 0/1
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|v| v != 0)),
        Value::String(s) => Ok(matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        )),
        _ => Ok(false),
    }
}

/// Accepts 40 and "40"; anything unparseable becomes 0
fn deserialize_length<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)),
        Value::String(s) => Ok(s.trim().parse::<u32>().unwrap_or(0)),
        _ => Ok(0),
    }
}

/// `{"result": [...]}` list envelope
#[derive(Debug, Deserialize)]
pub struct ResultEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// Authenticated user details, from sys_user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: String,
    /// sys_user exposes the login as `user_name`
    #[serde(default, alias = "user_name", deserialize_with = "deserialize_text")]
    pub user_id: String,
}

/// Table metadata from sys_db_object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableRecord")]
pub struct Table {
    pub name: String,
    pub label: String,
    pub sys_id: String,
    pub scope: String,
    pub description: String,
    /// Name of the parent table, empty for base tables
    pub super_class: String,
    pub accessible_from: String,
    pub extendable: bool,
    pub number_prefix: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<TableField>,
}

/// sys_db_object row as the table API returns it. `super_class` is a
/// reference (a sys_id unless display values were requested), so the
/// parent's name is read from the dot-walked `super_class.name` column.
#[derive(Debug, Deserialize)]
struct TableRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    label: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    sys_id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    scope: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    super_class: String,
    #[serde(rename = "super_class.name", default, deserialize_with = "deserialize_text")]
    super_class_name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    accessible_from: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    extendable: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    number_prefix: String,
    #[serde(default)]
    fields: Vec<TableField>,
}

impl From<TableRecord> for Table {
    fn from(record: TableRecord) -> Self {
        let super_class = if record.super_class_name.is_empty() {
            record.super_class
        } else {
            record.super_class_name
        };

        Table {
            name: record.name,
            label: record.label,
            sys_id: record.sys_id,
            scope: record.scope,
            description: record.description,
            super_class,
            accessible_from: record.accessible_from,
            extendable: record.extendable,
            number_prefix: record.number_prefix,
            fields: record.fields,
        }
    }
}

impl Table {
    pub fn has_super_class(&self) -> bool {
        !self.super_class.is_empty()
    }
}

/// Replace super classes that arrived as sys_ids with the name of the
/// crawled table carrying that sys_id. Unknown sys_ids are left as is.
pub fn resolve_super_classes(tables: &mut [Table]) {
    let names: HashMap<String, String> = tables
        .iter()
        .filter(|table| !table.sys_id.is_empty())
        .map(|table| (table.sys_id.clone(), table.name.clone()))
        .collect();

    for table in tables.iter_mut() {
        if let Some(name) = names.get(&table.super_class) {
            table.super_class = name.clone();
        }
    }
}

/// Field definition from sys_dictionary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableField {
    #[serde(rename(deserialize = "element"), default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(
        rename(deserialize = "column_label"),
        default,
        deserialize_with = "deserialize_text"
    )]
    pub label: String,
    #[serde(
        rename(serialize = "type", deserialize = "internal_type"),
        default,
        deserialize_with = "deserialize_text"
    )]
    pub field_type: String,
    #[serde(
        rename(serialize = "length", deserialize = "max_length"),
        default,
        deserialize_with = "deserialize_length"
    )]
    pub max_length: u32,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub mandatory: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub unique: bool,
}

/// A sys_dictionary row that references another table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReferenceHit {
    /// Table that owns the reference column
    #[serde(rename = "name", default, deserialize_with = "deserialize_text")]
    pub table: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub element: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub column_label: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_deserialization_with_reference_objects() {
        let json = r#"{
            "name": "incident",
            "label": "Incident",
            "sys_id": "abc123",
            "super_class": {"link": "https://dev1.service-now.com/api/now/table/sys_db_object/8f0c0a2fc0a8", "value": "8f0c0a2fc0a8"},
            "super_class.name": "task",
            "extendable": "true",
            "number_prefix": "INC"
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.name, "incident");
        assert_eq!(table.super_class, "task");
        assert!(table.extendable);
        assert_eq!(table.number_prefix, "INC");
        assert_eq!(table.description, "");
        assert!(table.fields.is_empty());
    }

    #[test]
    fn test_table_super_class_sys_id_without_name() {
        let json = r#"{
            "name": "incident",
            "super_class": {"link": "https://dev1.service-now.com/api/now/table/sys_db_object/8f0c0a2fc0a8", "value": "8f0c0a2fc0a8"}
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.super_class, "8f0c0a2fc0a8");
    }

    #[test]
    fn test_resolve_super_classes_by_sys_id() {
        let mut tables = vec![
            Table {
                name: "incident".to_string(),
                sys_id: "a1".to_string(),
                super_class: "8f0c0a2fc0a8".to_string(),
                ..Default::default()
            },
            Table {
                name: "task".to_string(),
                sys_id: "8f0c0a2fc0a8".to_string(),
                ..Default::default()
            },
            Table {
                name: "x_app_order".to_string(),
                sys_id: "c3".to_string(),
                super_class: "task".to_string(),
                ..Default::default()
            },
        ];
        resolve_super_classes(&mut tables);
        assert_eq!(tables[0].super_class, "task");
        assert!(!tables[1].has_super_class());
        assert_eq!(tables[2].super_class, "task");
    }

    #[test]
    fn test_field_length_out_of_range_is_zero() {
        let json = r#"{"element": "blob", "max_length": 4294967296}"#;
        let field: TableField = serde_json::from_str(json).unwrap();
        assert_eq!(field.max_length, 0);

        let json = r#"{"element": "blob", "max_length": 4294967295}"#;
        let field: TableField = serde_json::from_str(json).unwrap();
        assert_eq!(field.max_length, u32::MAX);
    }

    #[test]
    fn test_table_deserialization_with_display_values() {
        let json = r#"{
            "name": "task",
            "super_class": "",
            "scope": "Global",
            "extendable": false,
            "accessible_from": "All application scopes"
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert!(!table.has_super_class());
        assert!(!table.extendable);
        assert_eq!(table.scope, "Global");
        assert_eq!(table.accessible_from, "All application scopes");
    }

    #[test]
    fn test_field_deserialization_from_dictionary_keys() {
        let json = r#"{
            "element": "caller_id",
            "column_label": "Caller",
            "internal_type": {"link": "x", "value": "reference"},
            "max_length": "32",
            "reference": {"link": "y", "value": "sys_user"},
            "mandatory": "false",
            "unique": "true"
        }"#;
        let field: TableField = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "caller_id");
        assert_eq!(field.label, "Caller");
        assert_eq!(field.field_type, "reference");
        assert_eq!(field.max_length, 32);
        assert_eq!(field.reference.as_deref(), Some("sys_user"));
        assert!(!field.mandatory);
        assert!(field.unique);
    }

    #[test]
    fn test_field_empty_reference_is_none() {
        let json = r#"{"element": "short_description", "internal_type": "string", "max_length": 160, "reference": ""}"#;
        let field: TableField = serde_json::from_str(json).unwrap();
        assert_eq!(field.reference, None);
        assert_eq!(field.max_length, 160);
    }

    #[test]
    fn test_reference_hit_source_table() {
        let json = r#"{"name": "incident", "element": "parent", "column_label": "Parent", "reference": "task"}"#;
        let hit: ReferenceHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.table, "incident");
        assert_eq!(hit.element, "parent");
        assert_eq!(hit.reference, "task");
    }

    #[test]
    fn test_result_envelope_missing_result() {
        let envelope: ResultEnvelope<UserInfo> = serde_json::from_str("{}").unwrap();
        assert!(envelope.result.is_empty());

        let envelope: ResultEnvelope<UserInfo> = serde_json::from_str(
            r#"{"result": [{"name": "Ada Admin", "email": "ada@example.com", "user_id": "admin"}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.result[0].name, "Ada Admin");
        assert_eq!(envelope.result[0].user_id, "admin");
    }

    #[test]
    fn test_value_to_text_variants() {
        assert_eq!(value_to_text(serde_json::json!(null)), "");
        assert_eq!(value_to_text(serde_json::json!(42)), "42");
        assert_eq!(value_to_text(serde_json::json!(true)), "true");
        assert_eq!(
            value_to_text(serde_json::json!({"display_value": "Task", "value": "task"})),
            "Task"
        );
        assert_eq!(value_to_text(serde_json::json!(["a"])), "[\"a\"]");
    }
}
