//! Turn field values into drawable text, one formatter per render mode

use crate::record::{FieldValue, Scalar};

/// Single-line text for plain fields
pub fn plain_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(scalar) => scalar.to_string().replace(['\r', '\n'], " "),
        FieldValue::List(items) => items
            .iter()
            .filter(|item| !item.is_blank())
            .map(Scalar::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        FieldValue::Diagnoses(entries) => entries
            .iter()
            .filter(|entry| !entry.is_blank())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Rows for multiline fields and the fallback flow, top row first
pub fn text_lines(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Scalar(scalar) => split_lines(&scalar.to_string()),
        FieldValue::List(items) => items
            .iter()
            .flat_map(|item| split_lines(&item.to_string()))
            .collect(),
        FieldValue::Diagnoses(entries) => entries
            .iter()
            .filter(|entry| !entry.is_blank())
            .map(ToString::to_string)
            .collect(),
    }
}

/// Checkbox state
pub fn is_checked(value: &FieldValue) -> bool {
    match value {
        FieldValue::Scalar(scalar) => scalar.is_truthy(),
        FieldValue::List(items) => items.iter().any(Scalar::is_truthy),
        FieldValue::Diagnoses(entries) => !entries.is_empty(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Greedy word wrap that never splits a word; a word longer than `width`
/// gets a row of its own.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DiagnosisEntry;

    #[test]
    fn test_multiline_scalar_splits_on_newlines() {
        let value = FieldValue::from("ASD (F84.0)\nADHD (F90.0)");
        assert_eq!(text_lines(&value), vec!["ASD (F84.0)", "ADHD (F90.0)"]);
    }

    #[test]
    fn test_crlf_is_a_single_break() {
        let value = FieldValue::from("one\r\ntwo");
        assert_eq!(text_lines(&value), vec!["one", "two"]);
    }

    #[test]
    fn test_diagnoses_format() {
        let value = FieldValue::Diagnoses(vec![
            DiagnosisEntry::new("Autism Spectrum Disorder", Some("F84.0")),
            DiagnosisEntry::new("ADHD", None),
        ]);
        assert_eq!(
            text_lines(&value),
            vec!["Autism Spectrum Disorder (F84.0)", "ADHD"]
        );
        assert_eq!(plain_text(&value), "Autism Spectrum Disorder (F84.0); ADHD");
    }

    #[test]
    fn test_plain_text_of_list() {
        let value = FieldValue::from(vec!["Home".to_string(), "School".to_string()]);
        assert_eq!(plain_text(&value), "Home, School");
        assert_eq!(plain_text(&FieldValue::from("a\nb")), "a b");
    }

    #[test]
    fn test_checkbox_state() {
        assert!(is_checked(&FieldValue::from(true)));
        assert!(is_checked(&FieldValue::from("yes")));
        assert!(!is_checked(&FieldValue::from(false)));
        assert!(!is_checked(&FieldValue::from("No")));
    }

    #[test]
    fn test_wrap_short_line_is_untouched() {
        assert_eq!(wrap_line("short line", 90), vec!["short line"]);
    }

    #[test]
    fn test_wrap_packs_greedily_without_splitting_words() {
        let line = "aaaa bbbb cccc dddd";
        assert_eq!(wrap_line(line, 9), vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(wrap_line(line, 10), vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(wrap_line(line, 14), vec!["aaaa bbbb cccc", "dddd"]);
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        let long = "x".repeat(12);
        let line = format!("ab {} cd", long);
        assert_eq!(wrap_line(&line, 10), vec!["ab".to_string(), long, "cd".to_string()]);
    }

    #[test]
    fn test_wrap_rows_respect_width() {
        let line = "Applied Behavior Analysis (ABA) therapy recommended for Autism Spectrum Disorder, with family involvement and school coordination.";
        let rows = wrap_line(line, 90);
        assert!(rows.len() > 1);
        assert!(rows.iter().all(|row| row.chars().count() <= 90));
        assert_eq!(rows.join(" "), line);
    }
}
