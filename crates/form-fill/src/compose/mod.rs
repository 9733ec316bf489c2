//! Template compositing
//!
//! This module fills a template PDF:
//! 1. Load the template (bounded read)
//! 2. Render an overlay for every page that has fields
//! 3. Merge overlays onto copies of the template pages
//! 4. Serialize the assembled output document
//!
//! A page whose merge fails is kept as the original template page. Any
//! other failure is reported as [`FillOutcome::Failed`] so the caller can
//! fall back to the flow renderer.

mod io;
mod pages;

pub use io::load_template;
pub use pages::{copy_object_deep, copy_page, get_page_dimensions, merge_overlay_page};

use crate::record::DataRecord;
use crate::render::render_page;
use crate::schema::{FieldSpec, FormSchema, SchemaRegistry};
use crate::types::*;
use lopdf::{Dictionary, Document, Object};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// How a finished document was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// Overlays merged onto the template
    Template,
    /// Drawn from scratch by the flow renderer
    Fallback,
}

/// A finished, serialized PDF
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    bytes: Vec<u8>,
    page_count: usize,
    source: DocumentSource,
}

impl OutputDocument {
    pub fn new(bytes: Vec<u8>, page_count: usize, source: DocumentSource) -> Self {
        Self {
            bytes,
            page_count,
            source,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn source(&self) -> DocumentSource {
        self.source
    }
}

/// Result of a template fill attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FillOutcome {
    Filled(OutputDocument),
    /// Rendering failed; the message says why
    Failed(String),
}

impl FillOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FillOutcome::Filled(_))
    }
}

/// Fill the template at `template_path` for `form_type`.
///
/// Unknown form types, missing templates and read errors are returned as
/// errors. Rendering problems are returned as [`FillOutcome::Failed`].
pub async fn fill_template(
    template_path: impl AsRef<Path>,
    form_type: &str,
    record: &DataRecord,
    registry: &SchemaRegistry,
    io_timeout: Duration,
) -> Result<FillOutcome> {
    let schema = registry.schema_for(form_type)?;
    let bytes = load_template(template_path, io_timeout).await?;
    let record = record.clone();

    match tokio::task::spawn_blocking(move || fill_template_bytes(&bytes, &schema, &record)).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            log::error!("Template fill worker for {} failed: {}", form_type, e);
            Ok(FillOutcome::Failed(format!("fill worker failed: {}", e)))
        }
    }
}

/// Fill an in-memory template. Never returns an error: failures become
/// [`FillOutcome::Failed`].
pub fn fill_template_bytes(template: &[u8], schema: &FormSchema, record: &DataRecord) -> FillOutcome {
    let result = Document::load_mem(template)
        .map_err(FormError::from)
        .and_then(|doc| fill_document(&doc, schema, record));

    match result {
        Ok(document) => {
            log::info!(
                "Filled {} template ({} pages)",
                schema.form_type(),
                document.page_count()
            );
            FillOutcome::Filled(document)
        }
        Err(e) => {
            log::error!("Error filling {} template: {}", schema.form_type(), e);
            FillOutcome::Failed(e.to_string())
        }
    }
}

fn fill_document(template: &Document, schema: &FormSchema, record: &DataRecord) -> Result<OutputDocument> {
    let template_pages = template.get_pages();
    if template_pages.is_empty() {
        return Err(FormError::Rendering("template has no pages".to_string()));
    }
    if let Some(last) = schema.pages().last().filter(|&p| p >= template_pages.len()) {
        log::warn!(
            "{} schema places fields on page {} but the template has {} pages",
            schema.form_type(),
            last + 1,
            template_pages.len()
        );
    }

    let mut output = Document::with_version(template.version.clone());
    let pages_id = output.new_object_id();
    let mut cache = HashMap::new();
    let mut kids = Vec::new();

    for (index, page_id) in template_pages.values().copied().enumerate() {
        let fields = schema.fields_on(index);

        let new_page_id = if fields.is_empty() {
            copy_page(&mut output, template, page_id, pages_id, &mut cache)?
        } else {
            let (width, height) = get_page_dimensions(template, page_id)?;
            warn_out_of_bounds(fields, index, width, height);

            let overlay = render_page(fields, record, height);
            log::debug!(
                "Page {}: {} fields, {} draw operations",
                index,
                fields.len(),
                overlay.ops().len()
            );

            match merge_overlay_page(&mut output, template, page_id, pages_id, &overlay, &mut cache) {
                Ok(id) => id,
                Err(e) => {
                    let failure = FormError::PageMerge {
                        page: index,
                        reason: e.to_string(),
                    };
                    log::warn!("{}; keeping the original page", failure);
                    copy_page(&mut output, template, page_id, pages_id, &mut cache)?
                }
            }
        };

        kids.push(Object::Reference(new_page_id));
    }

    let page_count = kids.len();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_count as i64)),
    ]);
    output.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let mut writer = Vec::new();
    output.save_to(&mut writer)?;

    Ok(OutputDocument::new(writer, page_count, DocumentSource::Template))
}

/// Fields outside the actual template page would be clipped
fn warn_out_of_bounds(fields: &[FieldSpec], page: usize, width: f32, height: f32) {
    for field in fields {
        let (x, y) = field.position;
        if x > width || y > height {
            log::warn!(
                "Field '{}' at ({}, {}) lies outside page {} ({}x{})",
                field.name,
                x,
                y,
                page,
                width,
                height
            );
        }
    }
}
