//! Fallback flow renderer
//!
//! Draws a form from scratch when no template is available or filling the
//! template failed.

mod layout;
mod pdf;

pub use layout::{FlowLayout, FlowLine, FlowPage, LineStyle, layout_form};

use crate::compose::{DocumentSource, OutputDocument};
use crate::record::DataRecord;
use crate::types::*;

/// Render a form without a template
pub fn render_from_scratch(form_type: FormType, record: &DataRecord) -> Result<OutputDocument> {
    let layout = layout_form(form_type, record);
    let bytes = pdf::layout_to_pdf_bytes(form_type.title(), &layout);
    if bytes.is_empty() {
        return Err(FormError::Rendering(format!(
            "fallback renderer produced no output for {}",
            form_type
        )));
    }

    log::info!(
        "Rendered {} from scratch ({} pages)",
        form_type,
        layout.pages.len()
    );
    Ok(OutputDocument::new(bytes, layout.pages.len(), DocumentSource::Fallback))
}

/// Async wrapper running the renderer on the blocking pool
pub async fn render_from_scratch_async(form_type: FormType, record: &DataRecord) -> Result<OutputDocument> {
    let record = record.clone();
    tokio::task::spawn_blocking(move || render_from_scratch(form_type, &record)).await?
}
