//! Field value resolution with alias fallback

use crate::record::{DataRecord, FieldValue};

/// Alternate record keys that may satisfy a field, tried in order
const ALIASES: &[(&str, &[&str])] = &[
    ("child_name", &["member_name", "recipient_name"]),
    ("recipient_name", &["member_name", "child_name"]),
    ("dob", &["member_dob"]),
    ("diagnoses", &["diagnosis"]),
    ("symptoms", &["clinical_summary"]),
    ("treatment_recommendations", &["treatment_plan"]),
    ("measurable_goals", &["treatment_goals"]),
    ("clinical_info", &["clinical_information"]),
];

/// Configured aliases for a field, in priority order
pub fn aliases_for(field: &str) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Resolve the value to render for `field`.
///
/// The verbatim key wins when it holds a non-blank value; otherwise the
/// first non-blank alias does. The value is returned unchanged.
pub fn resolve<'a>(field: &str, record: &'a DataRecord) -> Option<&'a FieldValue> {
    if let Some(value) = non_blank(record, field) {
        log::debug!("Found field '{}'", field);
        return Some(value);
    }

    for alias in aliases_for(field) {
        if let Some(value) = non_blank(record, alias) {
            log::debug!("Using '{}' for '{}' field", alias, field);
            return Some(value);
        }
    }

    None
}

fn non_blank<'a>(record: &'a DataRecord, key: &str) -> Option<&'a FieldValue> {
    record.get(key).filter(|value| !value.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_key_wins() {
        let record = DataRecord::new()
            .with("child_name", "Jane Doe")
            .with("recipient_name", "Sam Lee");
        assert_eq!(
            resolve("child_name", &record),
            Some(&FieldValue::from("Jane Doe"))
        );
    }

    #[test]
    fn test_alias_fallback() {
        let record = DataRecord::new().with("recipient_name", "Sam Lee");
        assert_eq!(
            resolve("child_name", &record),
            Some(&FieldValue::from("Sam Lee"))
        );
    }

    #[test]
    fn test_first_alias_wins_deterministically() {
        let record = DataRecord::new()
            .with("recipient_name", "Sam Lee")
            .with("member_name", "Alex Kim");
        for _ in 0..10 {
            assert_eq!(
                resolve("child_name", &record),
                Some(&FieldValue::from("Alex Kim"))
            );
        }
    }

    #[test]
    fn test_blank_values_fall_through() {
        let record = DataRecord::new()
            .with("child_name", "   ")
            .with("member_name", "")
            .with("recipient_name", "Sam Lee");
        assert_eq!(
            resolve("child_name", &record),
            Some(&FieldValue::from("Sam Lee"))
        );
    }

    #[test]
    fn test_absent_field() {
        let record = DataRecord::new().with("unrelated", "value");
        assert_eq!(resolve("child_name", &record), None);
        assert_eq!(resolve("npi", &record), None);
        assert!(aliases_for("npi").is_empty());
    }

    #[test]
    fn test_raw_value_is_returned_unchanged() {
        let record = DataRecord::new().with(
            "diagnosis",
            vec!["ASD".to_string(), "ADHD".to_string()],
        );
        assert_eq!(
            resolve("diagnoses", &record),
            Some(&FieldValue::from(vec!["ASD".to_string(), "ADHD".to_string()]))
        );
    }
}
