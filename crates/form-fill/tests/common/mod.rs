#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub const TEMPLATE_CONTENT: &[u8] = b"BT /F1 12 Tf 72 720 Td (Template) Tj ET";

/// Letter-size template with `num_pages` pages that each print a label in
/// their own /F1 font
pub fn create_test_template(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Times-Roman".to_vec())),
    ]));

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), TEMPLATE_CONTENT.to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", media_box(612, 792)),
            (
                "Resources",
                Object::Dictionary(Dictionary::from_iter(vec![(
                    "Font",
                    Object::Dictionary(Dictionary::from_iter(vec![(
                        "F1",
                        Object::Reference(font_id),
                    )])),
                )])),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    finish_page_tree(&mut doc, pages_id, kids, Dictionary::new());
    doc
}

pub fn media_box(width: i64, height: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}

/// Write the Pages node (with any inheritable `extra` entries) and catalog
pub fn finish_page_tree(doc: &mut Document, pages_id: ObjectId, kids: Vec<Object>, extra: Dictionary) {
    let count = kids.len() as i64;
    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    for (key, value) in extra.iter() {
        pages_dict.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
}

pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

/// Page ids in document order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

pub fn page_content(doc: &Document, page: usize) -> Vec<u8> {
    doc.get_page_content(page_ids(doc)[page]).unwrap()
}

/// Every text draw on a page as (x, y, text), read from Td/Tj pairs
pub fn drawn_text(doc: &Document, page: usize) -> Vec<(f32, f32, String)> {
    let content = Content::decode(&page_content(doc, page)).unwrap();
    let mut position = (0.0, 0.0);
    let mut drawn = Vec::new();

    for op in content.operations {
        match op.operator.as_str() {
            "Td" => position = (number(&op.operands[0]), number(&op.operands[1])),
            "Tj" => {
                if let Object::String(bytes, _) = &op.operands[0] {
                    drawn.push((
                        position.0,
                        position.1,
                        String::from_utf8_lossy(bytes).into_owned(),
                    ));
                }
            }
            _ => {}
        }
    }
    drawn
}

pub fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected a number, found {:?}", other),
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

/// Resolve a page's /Resources dictionary
pub fn page_resources(doc: &Document, page: usize) -> Dictionary {
    let page_dict = doc.get_dictionary(page_ids(doc)[page]).unwrap();
    match page_dict.get(b"Resources").unwrap() {
        Object::Dictionary(dict) => dict.clone(),
        Object::Reference(id) => doc.get_dictionary(*id).unwrap().clone(),
        other => panic!("unexpected resources {:?}", other),
    }
}
