//! Shared constants for form filling
//!
//! This module centralizes page geometry, font metrics and layout numbers
//! used by the overlay and fallback renderers.

// =============================================================================
// Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Field Rendering
// =============================================================================

/// Default font size for form fields (points)
pub const DEFAULT_FIELD_FONT_SIZE: f32 = 10.0;

/// Extra leading added to the font size between multiline rows (points)
pub const MULTILINE_LEADING: f32 = 2.0;

/// Glyph for a checkmark in the ZapfDingbats encoding
pub const CHECKMARK_GLYPH: &str = "4";

/// Mark used for checkboxes rendered in a text face
pub const CHECKBOX_TEXT_MARK: &str = "X";

// =============================================================================
// Overlay Resources
// =============================================================================

/// Prefix for overlay font resource names, chosen to avoid clashing with
/// names already used by the template page
pub const OVERLAY_FONT_PREFIX: &str = "FfOv";

/// Graphics state resource used by the invisible marker
pub const CLEAR_GSTATE_NAME: &str = "FfOvClear";

// =============================================================================
// Fallback Flow Layout
// =============================================================================

/// Left margin of the fallback layout (points)
pub const FLOW_MARGIN_LEFT: f32 = 50.0;

/// Baseline of the title, measured down from the page top (points)
pub const FLOW_TITLE_OFFSET: f32 = 50.0;

/// First content baseline, measured down from the page top (points)
pub const FLOW_CONTENT_OFFSET: f32 = 100.0;

/// Cursor stops before this distance from the page bottom (points)
pub const FLOW_MARGIN_BOTTOM: f32 = 50.0;

/// Advance after a section heading (points)
pub const FLOW_HEADING_ADVANCE: f32 = 20.0;

/// Advance after a body line (points)
pub const FLOW_LINE_ADVANCE: f32 = 15.0;

/// Gap after a section (points)
pub const FLOW_SECTION_GAP: f32 = 15.0;

/// Characters per line before the fallback renderer wraps
pub const FLOW_WRAP_WIDTH: usize = 90;

/// Title font size (points)
pub const FLOW_TITLE_SIZE: f32 = 16.0;

/// Section heading font size (points)
pub const FLOW_HEADING_SIZE: f32 = 12.0;

/// Body font size (points)
pub const FLOW_BODY_SIZE: f32 = 10.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
