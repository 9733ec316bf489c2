//! Per-page overlay rendering

use crate::constants::{CHECKMARK_GLYPH, CHECKBOX_TEXT_MARK};
use crate::format::{is_checked, plain_text, text_lines};
use crate::record::DataRecord;
use crate::resolve::resolve;
use crate::schema::{FieldSpec, RenderMode, StandardFont};
use std::collections::BTreeSet;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text placed with its baseline origin at (x, y) in PDF user space
    Text {
        field: String,
        x: f32,
        y: f32,
        font: StandardFont,
        size: f32,
        text: String,
    },
    /// Invisible zero-size fill that keeps the content stream non-empty
    Marker,
}

/// A transparent drawing layer for one template page
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    ops: Vec<DrawOp>,
    drawn: bool,
}

impl RenderedOverlay {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Whether any field produced visible output
    pub fn has_content(&self) -> bool {
        self.drawn
    }

    pub fn has_marker(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Marker))
    }

    /// Text operations drawn for one field, in drawing order
    pub fn ops_for_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DrawOp> {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Text { field, .. } if field == name))
    }

    /// Faces referenced by the text operations
    pub fn fonts(&self) -> BTreeSet<StandardFont> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { font, .. } => Some(*font),
                DrawOp::Marker => None,
            })
            .collect()
    }
}

/// Render every field of one page.
///
/// `page_height` is the height of the template page the overlay will be
/// merged onto, used to flip top-origin coordinates.
pub fn render_page(fields: &[FieldSpec], record: &DataRecord, page_height: f32) -> RenderedOverlay {
    let mut ops = Vec::new();

    for spec in fields {
        let Some(value) = resolve(&spec.name, record) else {
            continue;
        };

        let (x, y) = spec.pdf_position(page_height);
        let text_op = |text: String, y: f32| DrawOp::Text {
            field: spec.name.clone(),
            x,
            y,
            font: spec.font,
            size: spec.size,
            text,
        };

        match spec.mode {
            RenderMode::Plain => {
                let text = plain_text(value);
                if !text.trim().is_empty() {
                    ops.push(text_op(text, y));
                }
            }
            RenderMode::Multiline => {
                for (i, line) in text_lines(value).into_iter().enumerate() {
                    if !line.trim().is_empty() {
                        ops.push(text_op(line, y - i as f32 * spec.line_height()));
                    }
                }
            }
            RenderMode::Checkbox => {
                if is_checked(value) {
                    let mark = if spec.font == StandardFont::ZapfDingbats {
                        CHECKMARK_GLYPH
                    } else {
                        CHECKBOX_TEXT_MARK
                    };
                    ops.push(text_op(mark.to_string(), y));
                }
            }
        }
    }

    let drawn = !ops.is_empty();
    if !drawn {
        ops.push(DrawOp::Marker);
    }

    RenderedOverlay { ops, drawn }
}
