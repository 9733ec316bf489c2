use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Unknown form type: {0}")]
    UnknownFormType(String),
    #[error("Template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("Page {page} merge failed: {reason}")]
    PageMerge { page: usize, reason: String },
    #[error("Rendering failed: {0}")]
    Rendering(String),
    #[error("Invalid form schema: {0}")]
    InvalidSchema(String),
    #[error("Invalid data record: {0}")]
    InvalidRecord(String),
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

/// The two supported order forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormType {
    /// Written Order for IBHS
    #[serde(rename = "ibhs")]
    Ibhs,
    /// Community Care IBHS Written Order Letter
    #[serde(rename = "communityCare", alias = "community_care")]
    CommunityCare,
}

impl FormType {
    pub const ALL: [FormType; 2] = [FormType::Ibhs, FormType::CommunityCare];

    /// Tag used on the wire and in configuration files
    pub fn tag(self) -> &'static str {
        match self {
            FormType::Ibhs => "ibhs",
            FormType::CommunityCare => "communityCare",
        }
    }

    /// Human readable form title
    pub fn title(self) -> &'static str {
        match self {
            FormType::Ibhs => "WRITTEN ORDER FOR IBHS",
            FormType::CommunityCare => "COMMUNITY CARE IBHS WRITTEN ORDER LETTER",
        }
    }

    /// Prefix for generated output filenames
    pub fn file_prefix(self) -> &'static str {
        match self {
            FormType::Ibhs => "ibhs-form",
            FormType::CommunityCare => "community-care",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FormType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ibhs" => Ok(FormType::Ibhs),
            "communityCare" | "community_care" => Ok(FormType::CommunityCare),
            other => Err(FormError::UnknownFormType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_type_tags() {
        assert_eq!("ibhs".parse::<FormType>().unwrap(), FormType::Ibhs);
        assert_eq!(
            "communityCare".parse::<FormType>().unwrap(),
            FormType::CommunityCare
        );
        assert_eq!(
            "community_care".parse::<FormType>().unwrap(),
            FormType::CommunityCare
        );
        assert_eq!(FormType::CommunityCare.to_string(), "communityCare");
    }

    #[test]
    fn test_unknown_form_type() {
        match "medicaid".parse::<FormType>() {
            Err(FormError::UnknownFormType(tag)) => assert_eq!(tag, "medicaid"),
            other => panic!("Expected UnknownFormType, got {:?}", other),
        }
    }
}
