//! Per-form field tables and their startup validation

use super::field::{FieldSpec, RenderMode};
use super::tables;
use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// All fields of one form, grouped by zero-based page index
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    form_type: FormType,
    pages: BTreeMap<usize, Vec<FieldSpec>>,
}

impl FormSchema {
    /// Group fields by page, keeping their authored order within a page
    pub fn from_fields(form_type: FormType, fields: Vec<FieldSpec>) -> Self {
        let mut pages: BTreeMap<usize, Vec<FieldSpec>> = BTreeMap::new();
        for field in fields {
            pages.entry(field.page).or_default().push(field);
        }
        Self { form_type, pages }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    /// Fields placed on a page; empty when the page has none
    pub fn fields_on(&self, page: usize) -> &[FieldSpec] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Page indices that carry at least one field
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.pages.values().flatten()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Check every field against the placement rules
    pub fn validate(&self) -> Result<()> {
        let (page_width, page_height) = DEFAULT_PAGE_DIMENSIONS;
        let mut seen = HashSet::new();

        for field in self.fields() {
            let context = format!("{} field '{}'", self.form_type, field.name);

            if field.name.trim().is_empty() {
                return Err(FormError::InvalidSchema(format!(
                    "{} has an empty name",
                    self.form_type
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::InvalidSchema(format!("{} is duplicated", context)));
            }
            if !field.size.is_finite() || field.size <= 0.0 {
                return Err(FormError::InvalidSchema(format!(
                    "{} has invalid size {}",
                    context, field.size
                )));
            }

            let (x, y) = field.position;
            if !(0.0..=page_width).contains(&x) || !(0.0..=page_height).contains(&y) {
                return Err(FormError::InvalidSchema(format!(
                    "{} at ({}, {}) lies outside the {}x{} page",
                    context, x, y, page_width, page_height
                )));
            }

            if field.mode == RenderMode::Checkbox && !field.font.can_draw_mark() {
                return Err(FormError::InvalidSchema(format!(
                    "{} is a checkbox but {} cannot draw a mark",
                    context,
                    field.font.base_font()
                )));
            }
        }

        Ok(())
    }
}

/// Field tables as stored in a JSON override file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaFile(pub BTreeMap<FormType, Vec<FieldSpec>>);

/// Immutable set of validated form schemas, shared by every request
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<FormType, Arc<FormSchema>>,
}

impl SchemaRegistry {
    /// The built-in tables for both forms, validated
    pub fn builtin() -> Result<Self> {
        Self::from_tables(
            FormType::ALL
                .into_iter()
                .map(|form_type| (form_type, tables::fields_for(form_type)))
                .collect(),
        )
    }

    /// Built-in tables with the forms present in `file` replaced
    pub fn with_overrides(file: SchemaFile) -> Result<Self> {
        let mut tables: BTreeMap<FormType, Vec<FieldSpec>> = FormType::ALL
            .into_iter()
            .map(|form_type| (form_type, tables::fields_for(form_type)))
            .collect();
        tables.extend(file.0);
        Self::from_tables(tables)
    }

    /// Load a JSON override file (see [`SchemaFile`])
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file: SchemaFile = serde_json::from_slice(&bytes)
            .map_err(|e| FormError::InvalidSchema(format!("Failed to parse schema: {}", e)))?;
        Self::with_overrides(file)
    }

    fn from_tables(tables: BTreeMap<FormType, Vec<FieldSpec>>) -> Result<Self> {
        let mut schemas = BTreeMap::new();
        for (form_type, fields) in tables {
            let schema = FormSchema::from_fields(form_type, fields);
            schema.validate()?;
            log::debug!(
                "Registered {} schema: {} fields on {} pages",
                form_type,
                schema.field_count(),
                schema.pages.len()
            );
            schemas.insert(form_type, Arc::new(schema));
        }
        Ok(Self { schemas })
    }

    /// Schema for a form type tag such as `ibhs` or `communityCare`
    pub fn schema_for(&self, form_type: &str) -> Result<Arc<FormSchema>> {
        self.get(form_type.parse()?)
    }

    pub fn get(&self, form_type: FormType) -> Result<Arc<FormSchema>> {
        self.schemas
            .get(&form_type)
            .cloned()
            .ok_or_else(|| FormError::UnknownFormType(form_type.to_string()))
    }

    /// Export the tables in the override file format
    pub fn to_schema_file(&self) -> SchemaFile {
        SchemaFile(
            self.schemas
                .iter()
                .map(|(form_type, schema)| (*form_type, schema.fields().cloned().collect()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StandardFont;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = SchemaRegistry::builtin().unwrap();
        let ibhs = registry.schema_for("ibhs").unwrap();
        assert_eq!(ibhs.form_type(), FormType::Ibhs);
        assert_eq!(ibhs.pages().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert!(ibhs.field("current_diagnoses").is_some());

        let cc = registry.schema_for("communityCare").unwrap();
        assert_eq!(cc.pages().collect::<Vec<_>>(), vec![0]);
        assert!(cc.fields_on(3).is_empty());
    }

    #[test]
    fn test_unknown_form_type() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert!(matches!(
            registry.schema_for("medicaid"),
            Err(FormError::UnknownFormType(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_field_rejected() {
        let schema = FormSchema::from_fields(
            FormType::Ibhs,
            vec![FieldSpec::text("dob", 0, 832.0, 225.0)],
        );
        match schema.validate() {
            Err(FormError::InvalidSchema(msg)) => assert!(msg.contains("outside")),
            other => panic!("Expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_checkbox_in_symbol_font_rejected() {
        let mut field = FieldSpec::checkbox("bcba", 3, 154.7, 432.0);
        field.font = StandardFont::Symbol;
        let schema = FormSchema::from_fields(FormType::Ibhs, vec![field]);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let schema = FormSchema::from_fields(
            FormType::CommunityCare,
            vec![
                FieldSpec::text("dob", 0, 10.0, 10.0),
                FieldSpec::text("dob", 1, 20.0, 20.0),
            ],
        );
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_overrides_replace_one_form() {
        let mut file = SchemaFile::default();
        file.0.insert(
            FormType::CommunityCare,
            vec![FieldSpec::text("recipient_name", 1, 100.0, 100.0)],
        );
        let registry = SchemaRegistry::with_overrides(file).unwrap();
        let cc = registry.get(FormType::CommunityCare).unwrap();
        assert_eq!(cc.field_count(), 1);
        assert_eq!(cc.fields_on(1).len(), 1);
        // IBHS keeps its built-in table
        assert!(registry.get(FormType::Ibhs).unwrap().field_count() > 1);
    }

    #[test]
    fn test_schema_file_round_trips_through_json() {
        let registry = SchemaRegistry::builtin().unwrap();
        let json = serde_json::to_string(&registry.to_schema_file()).unwrap();
        let file: SchemaFile = serde_json::from_str(&json).unwrap();
        let reloaded = SchemaRegistry::with_overrides(file).unwrap();
        assert_eq!(
            reloaded.get(FormType::Ibhs).unwrap().as_ref(),
            registry.get(FormType::Ibhs).unwrap().as_ref()
        );
    }
}
