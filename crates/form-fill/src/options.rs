use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where templates come from and where generated forms go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    // Output
    pub output_dir: PathBuf,

    // Templates
    pub templates_dir: PathBuf,
    pub ibhs_template: String,
    pub community_care_template: String,

    /// Upper bound on a single template read
    pub io_timeout_secs: u64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated_forms"),
            templates_dir: PathBuf::from("./templates"),
            ibhs_template: "ibhs_template.pdf".to_string(),
            community_care_template: "community_care_template.pdf".to_string(),
            io_timeout_secs: 30,
        }
    }
}

impl GenerationOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| FormError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FormError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(FormError::Config("No output directory specified".to_string()));
        }
        if self.io_timeout_secs == 0 {
            return Err(FormError::Config(
                "Template I/O timeout must be at least one second".to_string(),
            ));
        }

        for (form_type, name) in [
            (FormType::Ibhs, &self.ibhs_template),
            (FormType::CommunityCare, &self.community_care_template),
        ] {
            let path = Path::new(name);
            if name.trim().is_empty() || path.file_name().is_none_or(|f| f != path.as_os_str()) {
                return Err(FormError::Config(format!(
                    "{} template must be a plain file name, got '{}'",
                    form_type, name
                )));
            }
        }

        Ok(())
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.io_timeout_secs)
    }

    /// Full path of the template for a form
    pub fn template_path(&self, form_type: FormType) -> PathBuf {
        let name = match form_type {
            FormType::Ibhs => &self.ibhs_template,
            FormType::CommunityCare => &self.community_care_template,
        };
        self.templates_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = GenerationOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(
            options.template_path(FormType::CommunityCare),
            PathBuf::from("./templates/community_care_template.pdf")
        );
        assert_eq!(options.io_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_template_name_must_not_be_a_path() {
        let options = GenerationOptions {
            ibhs_template: "../secret/ibhs.pdf".to_string(),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(FormError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let options = GenerationOptions {
            io_timeout_secs: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
