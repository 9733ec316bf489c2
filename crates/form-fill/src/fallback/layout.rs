//! Flow layout for forms drawn without a template
//!
//! A title, then labeled sections drawn top to bottom from a fixed left
//! margin. The cursor moves down by a fixed advance per line and a new page
//! starts when it would pass the bottom margin.

use crate::constants::*;
use crate::format::{plain_text, text_lines, wrap_line};
use crate::record::DataRecord;
use crate::resolve::resolve;
use crate::types::FormType;

/// Placeholder for a missing single-value field
const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing section body
const NONE_SPECIFIED: &str = "None specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
}

impl LineStyle {
    pub fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => FLOW_TITLE_SIZE,
            LineStyle::Heading => FLOW_HEADING_SIZE,
            LineStyle::Body => FLOW_BODY_SIZE,
        }
    }

    pub fn is_bold(self) -> bool {
        !matches!(self, LineStyle::Body)
    }
}

/// One positioned line, baseline origin in PDF points
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLine {
    pub text: String,
    pub style: LineStyle,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowPage {
    pub lines: Vec<FlowLine>,
}

/// The positioned lines of every page
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<FlowPage>,
}

impl FlowLayout {
    pub fn lines(&self) -> impl Iterator<Item = &FlowLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }

    pub fn contains_line(&self, text: &str) -> bool {
        self.lines().any(|line| line.text == text)
    }
}

/// A labeled block of body lines
#[derive(Debug, Clone, PartialEq)]
struct Section {
    heading: &'static str,
    lines: Vec<String>,
}

/// Lay out the fallback document for a form on a Letter page
pub fn layout_form(form_type: FormType, record: &DataRecord) -> FlowLayout {
    let (width, height) = DEFAULT_PAGE_DIMENSIONS;
    let mut cursor = Cursor::new(width, height);

    cursor.title(form_type.title());
    for section in sections_for(form_type, record) {
        cursor.heading(section.heading);
        for line in &section.lines {
            for row in wrap_line(line, FLOW_WRAP_WIDTH) {
                cursor.body(row);
            }
        }
        cursor.gap();
    }

    FlowLayout {
        width,
        height,
        pages: cursor.finish(),
    }
}

fn sections_for(form_type: FormType, record: &DataRecord) -> Vec<Section> {
    match form_type {
        FormType::Ibhs => vec![
            Section {
                heading: "Child Information",
                lines: vec![
                    labeled("Child's Name", "child_name", record),
                    labeled("Date of Birth", "dob", record),
                    labeled("Parent/Guardian", "parent_guardian", record),
                ],
            },
            block("Current Behavioral Health Diagnoses", "current_diagnoses", record),
            block("Measurable Goals and Objectives", "measurable_goals", record),
            block("Clinical Information", "clinical_info", record),
        ],
        FormType::CommunityCare => vec![
            Section {
                heading: "Recipient Information",
                lines: vec![
                    labeled("Name", "recipient_name", record),
                    labeled("Date of Birth", "dob", record),
                    labeled("Age", "age", record),
                ],
            },
            block("Current Diagnoses", "diagnoses", record),
            block("Clinical Presentation/Symptoms", "symptoms", record),
            block("Treatment Recommendations", "treatment_recommendations", record),
            block("Medical Necessity", "medical_necessity", record),
        ],
    }
}

fn labeled(label: &str, field: &str, record: &DataRecord) -> String {
    let value = resolve(field, record)
        .map(plain_text)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!("{}: {}", label, value)
}

fn block(heading: &'static str, field: &str, record: &DataRecord) -> Section {
    let lines = resolve(field, record)
        .map(text_lines)
        .filter(|lines| lines.iter().any(|line| !line.trim().is_empty()))
        .unwrap_or_else(|| vec![NONE_SPECIFIED.to_string()]);
    Section { heading, lines }
}

/// Running vertical cursor over a sequence of pages
struct Cursor {
    width: f32,
    height: f32,
    y: f32,
    pages: Vec<FlowPage>,
}

impl Cursor {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            y: height - FLOW_CONTENT_OFFSET,
            pages: vec![FlowPage::default()],
        }
    }

    fn title(&mut self, text: &str) {
        let text_width = text.chars().count() as f32 * FLOW_TITLE_SIZE * HELVETICA_CHAR_WIDTH_RATIO;
        let x = ((self.width - text_width) / 2.0).max(FLOW_MARGIN_LEFT);
        let y = self.height - FLOW_TITLE_OFFSET;
        self.push(text.to_string(), LineStyle::Title, x, y);
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading together with its first body line
        self.ensure_room(FLOW_HEADING_ADVANCE);
        self.line(text.to_string(), LineStyle::Heading, FLOW_HEADING_ADVANCE);
    }

    fn body(&mut self, text: String) {
        self.ensure_room(0.0);
        self.line(text, LineStyle::Body, FLOW_LINE_ADVANCE);
    }

    fn gap(&mut self) {
        self.y -= FLOW_SECTION_GAP;
    }

    fn line(&mut self, text: String, style: LineStyle, advance: f32) {
        self.push(text, style, FLOW_MARGIN_LEFT, self.y);
        self.y -= advance;
    }

    fn ensure_room(&mut self, extra: f32) {
        if self.y - extra < FLOW_MARGIN_BOTTOM {
            self.pages.push(FlowPage::default());
            self.y = self.height - FLOW_TITLE_OFFSET;
        }
    }

    fn push(&mut self, text: String, style: LineStyle, x: f32, y: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(FlowLine { text, style, x, y });
        }
    }

    fn finish(self) -> Vec<FlowPage> {
        self.pages
    }
}
