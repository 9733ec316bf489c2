//! Generation orchestrator
//!
//! Per form: fill the configured template when it exists, otherwise (or
//! when filling fails) draw the form from scratch, then store the result.

use crate::compose::{FillOutcome, OutputDocument, fill_template};
use crate::fallback::render_from_scratch_async;
use crate::options::GenerationOptions;
use crate::output::OutputStore;
use crate::record::DataRecord;
use crate::schema::SchemaRegistry;
use crate::types::*;
use crate::validation::missing_required_fields;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How a form was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "camelCase")]
pub enum GenerationRoute {
    Template,
    Fallback { reason: String },
}

impl fmt::Display for GenerationRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationRoute::Template => f.write_str("template"),
            GenerationRoute::Fallback { reason } => write!(f, "fallback ({})", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedForm {
    pub form_type: FormType,
    pub filename: String,
    pub path: PathBuf,
    pub route: GenerationRoute,
    pub page_count: usize,
}

impl GeneratedForm {
    pub fn download_link(&self) -> String {
        format!("/download/{}", self.filename)
    }
}

/// Records for the forms to generate, in the request shape
/// `{"formData": {"ibhs": {...}, "communityCare": {...}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub form_data: Option<FormData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub ibhs: Option<DataRecord>,
    #[serde(default, rename = "communityCare", alias = "community_care")]
    pub community_care: Option<DataRecord>,
}

impl GenerationRequest {
    /// One record per form type. Both forms are always produced when
    /// `formData` is present; a missing key yields an empty record.
    pub fn records(&self) -> Vec<(FormType, DataRecord)> {
        let Some(form_data) = &self.form_data else {
            return Vec::new();
        };
        vec![
            (FormType::Ibhs, form_data.ibhs.clone().unwrap_or_default()),
            (
                FormType::CommunityCare,
                form_data.community_care.clone().unwrap_or_default(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub status: String,
    pub message: String,
    pub download_links: Vec<String>,
    pub forms: Vec<GeneratedForm>,
}

pub struct Generator {
    registry: SchemaRegistry,
    options: GenerationOptions,
    store: OutputStore,
}

impl Generator {
    pub fn new(registry: SchemaRegistry, options: GenerationOptions) -> Result<Self> {
        options.validate()?;
        let store = OutputStore::new(options.output_dir.clone());
        Ok(Self {
            registry,
            options,
            store,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    /// Produce and store one form
    pub async fn generate(&self, form_type: FormType, record: &DataRecord) -> Result<GeneratedForm> {
        let missing = missing_required_fields(form_type, record);
        if !missing.is_empty() {
            log::warn!("{} is missing required fields: {}", form_type, missing.join(", "));
        }

        let (document, route) = self.produce(form_type, record).await?;
        let filename = self
            .store
            .save(form_type.file_prefix(), document.bytes())
            .await?;

        log::info!("Generated {} via {}: {}", form_type, route, filename);
        Ok(GeneratedForm {
            form_type,
            path: self.store.root().join(&filename),
            filename,
            route,
            page_count: document.page_count(),
        })
    }

    async fn produce(
        &self,
        form_type: FormType,
        record: &DataRecord,
    ) -> Result<(OutputDocument, GenerationRoute)> {
        let template = self.options.template_path(form_type);

        let reason = match fill_template(
            &template,
            form_type.tag(),
            record,
            &self.registry,
            self.options.io_timeout(),
        )
        .await
        {
            Ok(FillOutcome::Filled(document)) => return Ok((document, GenerationRoute::Template)),
            Ok(FillOutcome::Failed(reason)) => reason,
            Err(FormError::TemplateNotFound(path)) => {
                log::info!("No template at {}, drawing {} from scratch", path.display(), form_type);
                format!("template not found: {}", path.display())
            }
            Err(FormError::UnknownFormType(tag)) => return Err(FormError::UnknownFormType(tag)),
            Err(e) => {
                log::error!("Could not use {} template: {}", form_type, e);
                e.to_string()
            }
        };

        let document = render_from_scratch_async(form_type, record).await?;
        Ok((document, GenerationRoute::Fallback { reason }))
    }

    /// Produce every form present in the request
    pub async fn generate_all(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let mut forms = Vec::new();
        for (form_type, record) in request.records() {
            forms.push(self.generate(form_type, &record).await?);
        }

        let (status, message) = if forms.is_empty() {
            log::warn!("Generation request has no form data");
            ("error", "Missing form data")
        } else {
            ("success", "Forms generated successfully")
        };

        Ok(GenerationReport {
            status: status.to_string(),
            message: message.to_string(),
            download_links: forms.iter().map(GeneratedForm::download_link).collect(),
            forms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "formData": {
                "ibhs": {"child_name": "Jane Doe"},
                "communityCare": {"recipient_name": "Jane Doe"}
            }
        }))
        .unwrap();
        let types: Vec<FormType> = request.records().into_iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec![FormType::Ibhs, FormType::CommunityCare]);
    }

    #[test]
    fn test_missing_form_key_yields_empty_record() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "formData": {"ibhs": {"child_name": "Jane Doe"}}
        }))
        .unwrap();
        let records = request.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].0, FormType::CommunityCare);
        assert_eq!(records[1].1, DataRecord::new());

        let request: GenerationRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.records().is_empty());
    }

    #[test]
    fn test_route_serialization() {
        let route = GenerationRoute::Fallback {
            reason: "template not found".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            json!({"route": "fallback", "reason": "template not found"})
        );
    }
}
