//! Content stream and resource encoding for overlays

use super::overlay::{DrawOp, RenderedOverlay};
use crate::constants::{CLEAR_GSTATE_NAME, OVERLAY_FONT_PREFIX};
use crate::schema::StandardFont;
use crate::types::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object};

/// Resource name under which an overlay font is registered
pub fn font_resource_name(font: StandardFont) -> String {
    format!("{}{}", OVERLAY_FONT_PREFIX, font.resource_suffix())
}

/// Font dictionary for a standard-14 face
pub fn font_dictionary(font: StandardFont) -> Dictionary {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
    if !font.is_symbolic() {
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    }
    font_dict
}

/// Graphics state that makes fills and strokes fully transparent
pub fn clear_graphics_state() -> Dictionary {
    let mut gs = Dictionary::new();
    gs.set("Type", Object::Name(b"ExtGState".to_vec()));
    gs.set("ca", Object::Real(0.0));
    gs.set("CA", Object::Real(0.0));
    gs
}

/// Encode text for a simple font. Latin faces use WinAnsiEncoding;
/// symbolic faces take the byte values as-is. Unmappable characters
/// become '?'.
pub fn encode_text(font: StandardFont, text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            if font.is_symbolic() {
                u8::try_from(u32::from(ch)).unwrap_or(b'?')
            } else {
                win_ansi_byte(ch).unwrap_or(b'?')
            }
        })
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            '\t' => Some(b' '),
            _ => None,
        },
    }
}

/// Build the overlay content stream operations
pub fn overlay_content(overlay: &RenderedOverlay) -> Content {
    let mut operations = Vec::new();

    for op in overlay.ops() {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
                ..
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("g", vec![Object::Integer(0)]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font_resource_name(*font).into_bytes()),
                        Object::Real(*size),
                    ],
                ));
                operations.push(Operation::new("Td", vec![Object::Real(*x), Object::Real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_text(*font, text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Marker => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "gs",
                    vec![Object::Name(CLEAR_GSTATE_NAME.as_bytes().to_vec())],
                ));
                operations.push(Operation::new(
                    "re",
                    vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ));
                operations.push(Operation::new("f", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
        }
    }

    Content { operations }
}

/// Serialize the overlay content stream
pub fn encode_overlay(overlay: &RenderedOverlay) -> Result<Vec<u8>> {
    Ok(overlay_content(overlay).encode()?)
}

/// Font and graphics-state entries an overlay needs on its page
pub fn overlay_resources(overlay: &RenderedOverlay) -> (Dictionary, Dictionary) {
    let mut fonts = Dictionary::new();
    for font in overlay.fonts() {
        fonts.set(
            font_resource_name(font).into_bytes(),
            Object::Dictionary(font_dictionary(font)),
        );
    }

    let mut states = Dictionary::new();
    if overlay.has_marker() {
        states.set(
            CLEAR_GSTATE_NAME.as_bytes().to_vec(),
            Object::Dictionary(clear_graphics_state()),
        );
    }

    (fonts, states)
}
