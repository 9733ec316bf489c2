//! Extracted patient data, as consumed by the renderers
//!
//! Upstream extraction produces loosely shaped JSON: the same logical field
//! may arrive as a string, a list of strings or a list of `{name, code}`
//! diagnosis objects. Values are normalized here into a closed set of
//! variants so the renderers can match on them exhaustively.

use crate::types::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A single textual, numeric or boolean value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Number(_) | Scalar::Bool(_) => false,
        }
    }

    /// Checkbox semantics: "yes", "x", "true", 1 and `true` check the box
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                !matches!(
                    s.as_str(),
                    "" | "false" | "no" | "n" | "0" | "off" | "none" | "unchecked"
                )
            }
            Scalar::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Scalar::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(true) => f.write_str("Yes"),
            Scalar::Bool(false) => f.write_str("No"),
        }
    }
}

/// One diagnosis, either a bare label or a name with an ICD code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DiagnosisEntry {
    pub fn new(name: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            name: name.into(),
            code: code.map(str::to_string),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Option<Self> {
        let text = |key: &str| match map.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let name = text("name");
        let code = text("code");
        if name.is_none() && code.is_none() {
            return None;
        }
        Some(Self {
            name: name.unwrap_or_default(),
            code,
        })
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.code.as_deref().is_none_or(|c| c.trim().is_empty())
    }
}

impl fmt::Display for DiagnosisEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.trim(), self.code.as_deref().map(str::trim)) {
            (name, Some(code)) if !name.is_empty() && !code.is_empty() => {
                write!(f, "{} ({})", name, code)
            }
            (name, Some(code)) if name.is_empty() => f.write_str(code),
            (name, _) => f.write_str(name),
        }
    }
}

/// The closed set of value shapes a field can carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Diagnoses(Vec<DiagnosisEntry>),
}

impl FieldValue {
    /// Normalize a JSON value; `None` for null and for shapes with no
    /// renderable content
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Scalar(Scalar::Bool(*b))),
            Value::Number(n) => Some(FieldValue::Scalar(Scalar::Number(n.clone()))),
            Value::String(s) => Some(FieldValue::Scalar(Scalar::Text(s.clone()))),
            Value::Object(map) => {
                DiagnosisEntry::from_object(map).map(|entry| FieldValue::Diagnoses(vec![entry]))
            }
            Value::Array(items) if items.iter().any(Value::is_object) => {
                let entries = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => DiagnosisEntry::from_object(map),
                        Value::String(s) => Some(DiagnosisEntry::new(s.trim(), None)),
                        Value::Number(n) => Some(DiagnosisEntry::new(n.to_string(), None)),
                        _ => None,
                    })
                    .collect();
                Some(FieldValue::Diagnoses(entries))
            }
            Value::Array(items) => Some(FieldValue::List(
                items
                    .iter()
                    .filter_map(|item| match FieldValue::from_json(item) {
                        Some(FieldValue::Scalar(scalar)) => Some(scalar),
                        _ => None,
                    })
                    .collect(),
            )),
        }
    }

    /// Blank values are treated as missing by the resolver
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Scalar(scalar) => scalar.is_blank(),
            FieldValue::List(items) => items.iter().all(Scalar::is_blank),
            FieldValue::Diagnoses(entries) => entries.iter().all(DiagnosisEntry::is_blank),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(Scalar::Text(s))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Scalar(Scalar::Bool(b))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items.into_iter().map(Scalar::Text).collect())
    }
}

impl From<Vec<DiagnosisEntry>> for FieldValue {
    fn from(entries: Vec<DiagnosisEntry>) -> Self {
        FieldValue::Diagnoses(entries)
    }
}

/// Key/value patient record for one form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataRecord {
    values: BTreeMap<String, FieldValue>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object; keys with null or unusable values are dropped
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in map {
            match FieldValue::from_json(value) {
                Some(field_value) => {
                    values.insert(key.clone(), field_value);
                }
                None if !value.is_null() => {
                    log::debug!("Ignoring unrecognized value shape for '{}'", key);
                }
                None => {}
            }
        }
        Self { values }
    }

    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_json_map(map)),
            other => Err(FormError::InvalidRecord(format!(
                "expected a JSON object, found {}",
                json_kind(other)
            ))),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_value(&serde_json::from_str(json)?)
    }

    /// Load a record from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json_value(&serde_json::from_slice(&bytes)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw lookup; does not consult aliases (see [`crate::resolve`])
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'de> Deserialize<'de> for DataRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        DataRecord::from_json_value(&value).map_err(serde::de::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tolerates_mixed_shapes() {
        let record = DataRecord::from_json_value(&json!({
            "child_name": "Jane Doe",
            "age": 9,
            "home_setting": true,
            "symptoms": ["Tantrums", null, "Elopement"],
            "diagnoses": [{"name": "Autism Spectrum Disorder", "code": "F84.0"}, "ADHD"],
            "guardian": {"name": "Pat Doe"},
            "missing": null,
            "junk": {"unexpected": 1},
        }))
        .unwrap();

        assert_eq!(record.get("child_name"), Some(&FieldValue::from("Jane Doe")));
        assert!(matches!(
            record.get("age"),
            Some(FieldValue::Scalar(Scalar::Number(_)))
        ));
        assert_eq!(
            record.get("symptoms"),
            Some(&FieldValue::from(vec![
                "Tantrums".to_string(),
                "Elopement".to_string()
            ]))
        );
        assert_eq!(
            record.get("diagnoses"),
            Some(&FieldValue::Diagnoses(vec![
                DiagnosisEntry::new("Autism Spectrum Disorder", Some("F84.0")),
                DiagnosisEntry::new("ADHD", None),
            ]))
        );
        assert_eq!(
            record.get("guardian"),
            Some(&FieldValue::Diagnoses(vec![DiagnosisEntry::new("Pat Doe", None)]))
        );
        assert!(record.get("missing").is_none());
        assert!(record.get("junk").is_none());
    }

    #[test]
    fn test_rejects_non_object_record() {
        assert!(matches!(
            DataRecord::from_json_str("[1, 2]"),
            Err(FormError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(FieldValue::Diagnoses(vec![]).is_blank());
        assert!(!FieldValue::from(false).is_blank());
        assert!(!FieldValue::from("x").is_blank());
    }

    #[test]
    fn test_diagnosis_display() {
        assert_eq!(
            DiagnosisEntry::new("Autism Spectrum Disorder", Some("F84.0")).to_string(),
            "Autism Spectrum Disorder (F84.0)"
        );
        assert_eq!(DiagnosisEntry::new("ADHD", None).to_string(), "ADHD");
        assert_eq!(DiagnosisEntry::new("", Some("F90.0")).to_string(), "F90.0");
    }

    #[test]
    fn test_truthiness() {
        assert!(Scalar::Text("Yes".into()).is_truthy());
        assert!(Scalar::Text("X".into()).is_truthy());
        assert!(!Scalar::Text("no".into()).is_truthy());
        assert!(!Scalar::Text(" false ".into()).is_truthy());
        assert!(!Scalar::Bool(false).is_truthy());
        assert!(Scalar::Number(1.into()).is_truthy());
        assert!(!Scalar::Number(0.into()).is_truthy());
    }

    #[test]
    fn test_deserialize_record() {
        let record: DataRecord = serde_json::from_str(r#"{"dob": "01/01/2015"}"#).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"dob": "01/01/2015"})
        );
    }
}
