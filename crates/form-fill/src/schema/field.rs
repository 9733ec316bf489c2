//! Field placement metadata

use crate::constants::DEFAULT_FIELD_FONT_SIZE;
use serde::{Deserialize, Serialize};

/// PDF standard-14 font faces available to overlays without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum StandardFont {
    #[default]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    #[serde(rename = "Times-Bold")]
    TimesBold,
    Courier,
    #[serde(rename = "Courier-Bold")]
    CourierBold,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// The `/BaseFont` name written into the font dictionary
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Short tag used to build the overlay resource name
    pub fn resource_suffix(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helv",
            StandardFont::HelveticaBold => "HeBo",
            StandardFont::HelveticaOblique => "HeOb",
            StandardFont::TimesRoman => "TiRo",
            StandardFont::TimesBold => "TiBo",
            StandardFont::Courier => "Cour",
            StandardFont::CourierBold => "CoBo",
            StandardFont::Symbol => "Symb",
            StandardFont::ZapfDingbats => "ZaDb",
        }
    }

    /// Symbolic faces carry their own built-in encoding
    pub fn is_symbolic(self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Whether a checkbox mark can be drawn in this face: a checkmark in
    /// ZapfDingbats, or a literal "X" in any Latin text face.
    pub fn can_draw_mark(self) -> bool {
        self != StandardFont::Symbol
    }
}

/// How a field value is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Single line of text at the field position
    #[default]
    Plain,
    /// One row per newline-separated line, stepping down by size + 2
    Multiline,
    /// A single mark glyph when the value is truthy
    Checkbox,
}

/// Which page edge the authored y coordinate is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Measured downward from the top edge, as in an image editor
    #[default]
    Top,
    /// Already in PDF user space (bottom-left origin)
    Bottom,
}

/// Placement and styling for one logical form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Zero-based page index
    pub page: usize,
    /// Authored (x, y) in points
    pub position: (f32, f32),
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub font: StandardFont,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default)]
    pub mode: RenderMode,
}

fn default_size() -> f32 {
    DEFAULT_FIELD_FONT_SIZE
}

impl FieldSpec {
    /// Plain Helvetica text field measured from the page top
    pub fn text(name: &str, page: usize, x: f32, y: f32) -> Self {
        Self {
            name: name.to_string(),
            page,
            position: (x, y),
            origin: Origin::Top,
            font: StandardFont::Helvetica,
            size: DEFAULT_FIELD_FONT_SIZE,
            mode: RenderMode::Plain,
        }
    }

    /// Multiline Helvetica text field measured from the page top
    pub fn multiline(name: &str, page: usize, x: f32, y: f32) -> Self {
        Self {
            mode: RenderMode::Multiline,
            ..Self::text(name, page, x, y)
        }
    }

    /// ZapfDingbats checkbox measured from the page top
    pub fn checkbox(name: &str, page: usize, x: f32, y: f32) -> Self {
        Self {
            font: StandardFont::ZapfDingbats,
            mode: RenderMode::Checkbox,
            ..Self::text(name, page, x, y)
        }
    }

    /// Position in PDF user space for a page of the given height
    pub fn pdf_position(&self, page_height: f32) -> (f32, f32) {
        let (x, y) = self.position;
        match self.origin {
            Origin::Top => (x, page_height - y),
            Origin::Bottom => (x, y),
        }
    }

    /// Distance between consecutive multiline rows
    pub fn line_height(&self) -> f32 {
        self.size + crate::constants::MULTILINE_LEADING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_origin_conversion() {
        let spec = FieldSpec::text("child_name", 0, 250.0, 150.0);
        assert_eq!(spec.pdf_position(792.0), (250.0, 642.0));
    }

    #[test]
    fn test_bottom_origin_is_untouched() {
        let mut spec = FieldSpec::text("npi", 4, 340.0, 100.0);
        spec.origin = Origin::Bottom;
        assert_eq!(spec.pdf_position(792.0), (340.0, 100.0));
    }

    #[test]
    fn test_field_spec_json_defaults() {
        let spec: FieldSpec =
            serde_json::from_str(r#"{"name": "dob", "page": 0, "position": [433.3, 150.0]}"#)
                .unwrap();
        assert_eq!(spec.font, StandardFont::Helvetica);
        assert_eq!(spec.size, 10.0);
        assert_eq!(spec.mode, RenderMode::Plain);
        assert_eq!(spec.origin, Origin::Top);
    }

    #[test]
    fn test_checkbox_helpers() {
        let spec = FieldSpec::checkbox("home_setting", 3, 470.0, 294.0);
        assert_eq!(spec.font, StandardFont::ZapfDingbats);
        assert!(spec.font.can_draw_mark());
        assert!(!StandardFont::Symbol.can_draw_mark());
        assert_eq!(spec.line_height(), 12.0);
    }
}
