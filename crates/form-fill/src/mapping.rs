//! Map an extracted patient profile onto per-form data records

use crate::record::{DataRecord, DiagnosisEntry, FieldValue};
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    #[serde(default)]
    pub name: Option<String>,
}

/// Patient information as produced by document extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    /// Number or free text
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub guardian: Option<Guardian>,
    #[serde(default)]
    pub diagnoses: Vec<DiagnosisEntry>,
    /// A list of goals or a single free-text block
    #[serde(default)]
    pub goals: Option<Value>,
    /// A list of symptoms or a single free-text block
    #[serde(default)]
    pub symptoms: Option<Value>,
    #[serde(default)]
    pub treatment_history: Option<Value>,
}

impl PatientProfile {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Data record for one form
    pub fn to_record(&self, form_type: FormType) -> DataRecord {
        let mut record = DataRecord::new();
        let mut set = |key: &str, value: Option<FieldValue>| {
            if let Some(value) = value {
                record.insert(key, value);
            }
        };

        match form_type {
            FormType::Ibhs => {
                set("child_name", text(&self.name));
                set("dob", text(&self.dob));
                set(
                    "parent_guardian",
                    text(&self.guardian.as_ref().and_then(|g| g.name.clone())),
                );
                set("current_diagnoses", Some(format_diagnoses(&self.diagnoses).into()));
                set("measurable_goals", Some(format_goals(self.goals.as_ref()).into()));
                set(
                    "clinical_information",
                    Some(format_symptoms(self.symptoms.as_ref()).into()),
                );
                set(
                    "treatment_history",
                    self.treatment_history.as_ref().and_then(FieldValue::from_json),
                );
            }
            FormType::CommunityCare => {
                set("recipient_name", text(&self.name));
                set("dob", text(&self.dob));
                set("age", self.age.as_ref().and_then(FieldValue::from_json));
                set("diagnoses", Some(format_diagnoses(&self.diagnoses).into()));
                set("symptoms", Some(format_symptoms(self.symptoms.as_ref()).into()));
                set(
                    "treatment_recommendations",
                    Some(treatment_recommendations(self).into()),
                );
                set("medical_necessity", Some(medical_necessity(self).into()));
            }
        }

        record
    }

    fn symptom_list(&self) -> Vec<String> {
        match &self.symptoms {
            Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
            _ => Vec::new(),
        }
    }

    fn has_symptoms(&self) -> bool {
        match &self.symptoms {
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(s)) => !s.trim().is_empty(),
            _ => false,
        }
    }

    fn has_diagnosis_named(&self, needle: &str) -> bool {
        self.diagnoses
            .iter()
            .any(|dx| dx.name.to_lowercase().contains(needle))
    }
}

fn text(value: &Option<String>) -> Option<FieldValue> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(FieldValue::from)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// One `name (code)` line per diagnosis
pub fn format_diagnoses(diagnoses: &[DiagnosisEntry]) -> String {
    let lines: Vec<String> = diagnoses
        .iter()
        .filter(|dx| !dx.is_blank())
        .map(ToString::to_string)
        .collect();
    if lines.is_empty() {
        "No diagnoses available".to_string()
    } else {
        lines.join("\n")
    }
}

/// Numbered goals; free text passes through
pub fn format_goals(goals: Option<&Value>) -> String {
    match goals {
        Some(Value::String(s)) if !s.trim().is_empty() && !s.eq_ignore_ascii_case("none") => {
            s.clone()
        }
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .filter_map(value_text)
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "Goals to be determined".to_string(),
    }
}

/// Bulleted symptoms; free text passes through
pub fn format_symptoms(symptoms: Option<&Value>) -> String {
    match symptoms {
        Some(Value::String(s)) if !s.trim().is_empty() && !s.eq_ignore_ascii_case("none") => {
            s.clone()
        }
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .filter_map(value_text)
            .map(|symptom| format!("• {}", symptom))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No symptoms documented".to_string(),
    }
}

/// Recommendations keyed on diagnostic categories
pub fn treatment_recommendations(profile: &PatientProfile) -> String {
    if profile.diagnoses.is_empty() && !profile.has_symptoms() {
        return "Treatment recommendations to be determined following comprehensive assessment."
            .to_string();
    }

    let mut lines = Vec::new();
    if profile.has_diagnosis_named("autism") {
        lines.push("Applied Behavior Analysis (ABA) therapy recommended for Autism Spectrum Disorder.");
    }
    if profile.has_diagnosis_named("attention") {
        lines.push("Behavior management strategies recommended for attention-related concerns.");
    }
    if lines.is_empty() {
        lines.push("Individual therapy sessions recommended to address identified behavioral health concerns.");
        lines.push("Family involvement in treatment process is recommended.");
    }
    lines.join("\n")
}

/// Medical necessity statement
pub fn medical_necessity(profile: &PatientProfile) -> String {
    if profile.diagnoses.is_empty() && !profile.has_symptoms() {
        return "Medical necessity to be determined following comprehensive assessment.".to_string();
    }

    let mut lines = vec!["Treatment is medically necessary based on:"];
    if !profile.diagnoses.is_empty() {
        lines.push("• Presence of behavioral health diagnosis requiring intervention");
    }
    let symptoms = profile.symptom_list();
    if !symptoms.is_empty() {
        lines.push("• Presence of symptoms impacting daily functioning");
        if symptoms.len() >= 3 {
            lines.push("• Multiple areas of functioning impacted by symptoms");
        }
    }
    lines.push("• Treatment is expected to improve functioning and prevent deterioration");
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::text_lines;
    use serde_json::json;

    fn profile() -> PatientProfile {
        serde_json::from_value(json!({
            "name": "Jane Doe",
            "dob": "01/01/2015",
            "age": 9,
            "guardian": {"name": "John Doe"},
            "diagnoses": [
                {"name": "Autism Spectrum Disorder", "code": "F84.0"},
                {"name": "Attention-deficit hyperactivity disorder"}
            ],
            "goals": ["Reduce elopement", "Increase requesting"],
            "symptoms": ["Elopement", "Tantrums", "Limited speech"]
        }))
        .unwrap()
    }

    #[test]
    fn test_ibhs_record() {
        let record = profile().to_record(FormType::Ibhs);
        assert_eq!(record.get("child_name"), Some(&FieldValue::from("Jane Doe")));
        assert_eq!(record.get("parent_guardian"), Some(&FieldValue::from("John Doe")));
        assert_eq!(
            text_lines(record.get("current_diagnoses").unwrap()),
            vec![
                "Autism Spectrum Disorder (F84.0)",
                "Attention-deficit hyperactivity disorder"
            ]
        );
        assert_eq!(
            text_lines(record.get("measurable_goals").unwrap()),
            vec!["1. Reduce elopement", "2. Increase requesting"]
        );
        assert_eq!(
            text_lines(record.get("clinical_information").unwrap())[0],
            "• Elopement"
        );
    }

    #[test]
    fn test_community_care_record() {
        let record = profile().to_record(FormType::CommunityCare);
        assert_eq!(record.get("recipient_name"), Some(&FieldValue::from("Jane Doe")));
        assert!(record.get("age").is_some());

        let recommendations = text_lines(record.get("treatment_recommendations").unwrap());
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations[0].starts_with("Applied Behavior Analysis"));

        let necessity = text_lines(record.get("medical_necessity").unwrap());
        assert_eq!(necessity.len(), 5);
        assert!(necessity.contains(&"• Multiple areas of functioning impacted by symptoms".to_string()));
    }

    #[test]
    fn test_empty_profile_placeholders() {
        let empty = PatientProfile::default();
        assert_eq!(format_diagnoses(&empty.diagnoses), "No diagnoses available");
        assert_eq!(format_goals(None), "Goals to be determined");
        assert_eq!(format_goals(Some(&json!("None"))), "Goals to be determined");
        assert_eq!(format_symptoms(Some(&json!([]))), "No symptoms documented");
        assert_eq!(
            medical_necessity(&empty),
            "Medical necessity to be determined following comprehensive assessment."
        );
        assert!(treatment_recommendations(&empty).starts_with("Treatment recommendations to be determined"));
    }

    #[test]
    fn test_generic_recommendations() {
        let profile = PatientProfile {
            diagnoses: vec![DiagnosisEntry::new("Anxiety disorder", Some("F41.9"))],
            ..Default::default()
        };
        let text = treatment_recommendations(&profile);
        assert!(text.starts_with("Individual therapy sessions"));
        assert!(text.ends_with("Family involvement in treatment process is recommended."));
    }
}
