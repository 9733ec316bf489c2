//! Overlay rendering
//!
//! This module turns one page's worth of resolved field values into a
//! transparent drawing layer:
//! - Recording draw operations per field and render mode
//! - Encoding them as a PDF content stream
//! - Describing the font and graphics-state resources they need

mod encoding;
mod overlay;

pub use encoding::{encode_overlay, encode_text, font_resource_name, overlay_resources};
pub use overlay::{DrawOp, RenderedOverlay, render_page};
