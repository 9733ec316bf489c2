use super::layout::{FlowLayout, FlowLine};
use printpdf::*;

/// Draw a flow layout with the built-in Helvetica faces
pub fn layout_to_pdf_bytes(title: &str, layout: &FlowLayout) -> Vec<u8> {
    let mut doc = PdfDocument::new(title);

    for page in &layout.pages {
        let ops = page.lines.iter().flat_map(line_ops).collect();
        doc.pages.push(PdfPage {
            media_box: page_rect(layout),
            trim_box: page_rect(layout),
            crop_box: page_rect(layout),
            ops,
        });
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        log::debug!("printpdf: {:?}", warning);
    }
    bytes
}

fn line_ops(line: &FlowLine) -> Vec<Op> {
    let font = if line.style.is_bold() {
        BuiltinFont::HelveticaBold
    } else {
        BuiltinFont::Helvetica
    };

    vec![
        Op::StartTextSection,
        Op::SetFontSizeBuiltinFont {
            size: Pt(line.style.font_size()),
            font,
        },
        Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(line.x), Pt(line.y)),
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line.text.clone())],
            font,
        },
        Op::EndTextSection,
    ]
}

fn page_rect(layout: &FlowLayout) -> Rect {
    Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(layout.width),
        height: Pt(layout.height),
    }
}
