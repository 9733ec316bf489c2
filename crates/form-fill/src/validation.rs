//! Required-field check
//!
//! Generation never blocks on missing data; callers log the result.

use crate::record::DataRecord;
use crate::resolve::resolve;
use crate::types::FormType;

/// (field name, human readable label)
fn required_fields(form_type: FormType) -> &'static [(&'static str, &'static str)] {
    match form_type {
        FormType::Ibhs => &[
            ("child_name", "Child's Name"),
            ("dob", "Date of Birth"),
            ("current_diagnoses", "Current Diagnoses"),
        ],
        FormType::CommunityCare => &[
            ("recipient_name", "Recipient Name"),
            ("dob", "Date of Birth"),
            ("diagnoses", "Current Diagnoses"),
        ],
    }
}

/// Labels of the required fields that are absent or blank, resolved
/// through the alias table
pub fn missing_required_fields(form_type: FormType, record: &DataRecord) -> Vec<&'static str> {
    required_fields(form_type)
        .iter()
        .filter(|(field, _)| resolve(field, record).is_none_or(|value| value.is_blank()))
        .map(|(_, label)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_record() {
        let record = DataRecord::new()
            .with("child_name", "Jane Doe")
            .with("dob", "01/01/2015")
            .with("current_diagnoses", "ASD");
        assert!(missing_required_fields(FormType::Ibhs, &record).is_empty());
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let record = DataRecord::new().with("dob", "  ");
        assert_eq!(
            missing_required_fields(FormType::Ibhs, &record),
            vec!["Child's Name", "Date of Birth", "Current Diagnoses"]
        );
    }

    #[test]
    fn test_aliases_satisfy_requirements() {
        let record = DataRecord::new()
            .with("member_name", "Sam Roe")
            .with("member_dob", "02/02/2016")
            .with("diagnosis", "F84.0");
        assert!(missing_required_fields(FormType::CommunityCare, &record).is_empty());
    }
}
