//! Page copying and overlay merging
//!
//! Template pages are copied object-by-object into a fresh output
//! document. A page with an overlay keeps its original content streams
//! as they are (never decoded), wrapped in a q/Q pair, and gets the
//! overlay appended as one more stream.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::render::{RenderedOverlay, encode_overlay, overlay_resources};
use crate::types::{FormError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed, cyclic page trees
const MAX_TREE_DEPTH: usize = 32;

// =============================================================================
// Page Copy
// =============================================================================

/// Copy a template page into `output` unmodified, re-parented under
/// `parent_id`. Inherited attributes are made explicit on the copy.
pub fn copy_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    parent_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;
    let (new_id, mut new_dict) = copy_page_entries(output, source, page_id, page_dict, &[], cache)?;
    new_dict.set("Parent", Object::Reference(parent_id));
    output.objects.insert(new_id, Object::Dictionary(new_dict));
    Ok(new_id)
}

/// Copy every page entry except `Parent` and `skip`, including inherited
/// attributes. The page's new id is reserved and cached first since
/// annotations point back at their page.
fn copy_page_entries(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    page_dict: &Dictionary,
    skip: &[&[u8]],
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<(ObjectId, Dictionary)> {
    let new_id = output.new_object_id();
    cache.insert(page_id, new_id);

    let mut new_dict = Dictionary::new();
    for (key, value) in page_dict.iter() {
        if key.as_slice() == b"Parent" || skip.contains(&key.as_slice()) {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }

    for key in INHERITABLE_ATTRIBUTES {
        if page_dict.has(key) || skip.contains(&key) {
            continue;
        }
        if let Some(value) = inherited_attribute(source, page_id, key) {
            new_dict.set(key.to_vec(), copy_object_deep(output, source, value, cache)?);
        }
    }

    Ok((new_id, new_dict))
}

/// Copy a template page and draw `overlay` on top of its content.
///
/// Everything that can fail is checked before the output is touched, so
/// an error leaves `output` and `cache` as they were.
pub fn merge_overlay_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    parent_id: ObjectId,
    overlay: &RenderedOverlay,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let overlay_content = encode_overlay(overlay)?;
    if overlay_content.is_empty() {
        return Err(FormError::Rendering(
            "overlay content stream is empty".to_string(),
        ));
    }

    let page_dict = source.get_dictionary(page_id)?;
    let original_streams = content_streams(source, page_dict)?;

    let mut resources = match inherited_attribute(source, page_id, b"Resources") {
        Some(obj) => match resolve(source, obj)? {
            Object::Dictionary(dict) => dict.clone(),
            other => {
                return Err(FormError::Rendering(format!(
                    "page resources is {} instead of a dictionary",
                    other.enum_variant()
                )));
            }
        },
        None => Dictionary::new(),
    };
    let (fonts, states) = overlay_resources(overlay);
    merge_resource_category(source, &mut resources, b"Font", fonts)?;
    merge_resource_category(source, &mut resources, b"ExtGState", states)?;

    let (new_id, mut new_dict) = copy_page_entries(
        output,
        source,
        page_id,
        page_dict,
        &[b"Contents", b"Resources"],
        cache,
    )?;

    let mut contents = Vec::with_capacity(original_streams.len() + 2);
    contents.push(Object::Reference(
        output.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec())),
    ));
    for stream in original_streams {
        let copied = match copy_object_deep(output, source, stream, cache)? {
            Object::Reference(id) => id,
            direct => output.add_object(direct),
        };
        contents.push(Object::Reference(copied));
    }

    let mut closing = b"\nQ\n".to_vec();
    closing.extend_from_slice(&overlay_content);
    contents.push(Object::Reference(
        output.add_object(Stream::new(Dictionary::new(), closing)),
    ));

    let resources = copy_object_deep(output, source, &Object::Dictionary(resources), cache)?;
    new_dict.set("Contents", Object::Array(contents));
    new_dict.set("Resources", resources);
    new_dict.set("Parent", Object::Reference(parent_id));
    output.objects.insert(new_id, Object::Dictionary(new_dict));

    Ok(new_id)
}

/// Add overlay entries to one resource category (`/Font`, `/ExtGState`)
fn merge_resource_category(
    source: &Document,
    resources: &mut Dictionary,
    category: &[u8],
    entries: Dictionary,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut merged = match resources.get(category) {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => source.get_dictionary(*id)?.clone(),
        Ok(_) => {
            return Err(FormError::Rendering(format!(
                "/{} resource is not a dictionary",
                String::from_utf8_lossy(category)
            )));
        }
        Err(_) => Dictionary::new(),
    };

    for (key, value) in entries.iter() {
        merged.set(key.clone(), value.clone());
    }
    resources.set(category.to_vec(), Object::Dictionary(merged));
    Ok(())
}

// =============================================================================
// Page Content
// =============================================================================

/// The page's content stream objects, unresolved, in drawing order.
///
/// A page without `/Contents` is blank and has none. Contents that do not
/// resolve to streams are an error: merging onto them would lose the page.
fn content_streams<'a>(doc: &'a Document, page_dict: &'a Dictionary) -> Result<Vec<&'a Object>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match resolve(doc, contents)? {
        Object::Stream(_) => Ok(vec![contents]),
        Object::Array(arr) => {
            for obj in arr {
                let resolved = resolve(doc, obj)?;
                if !matches!(resolved, Object::Stream(_)) {
                    return Err(FormError::Rendering(format!(
                        "content array holds {} instead of a stream",
                        resolved.enum_variant()
                    )));
                }
            }
            Ok(arr.iter().collect())
        }
        other => Err(FormError::Rendering(format!(
            "page contents is {} instead of a stream",
            other.enum_variant()
        ))),
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times. The target
/// id is reserved before recursing so reference cycles terminate. Dangling
/// references become null, as a reader would treat them.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let copied = match source.get_object(*id) {
                Ok(referenced) => copy_object_deep(output, source, referenced, cache)?,
                Err(_) => Object::Null,
            };
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Get page dimensions (width, height) in points, honoring inherited
/// MediaBox values. Falls back to US Letter.
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    doc.get_dictionary(page_id)?;

    let media_box = inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|obj| resolve(doc, obj).ok())
        .and_then(|obj| obj.as_array().ok());

    let Some(mb) = media_box.filter(|mb| mb.len() == 4) else {
        return Ok(DEFAULT_PAGE_DIMENSIONS);
    };

    let coords: Vec<f32> = mb.iter().filter_map(extract_number).collect();
    match coords.as_slice() {
        [llx, lly, urx, ury] if urx > llx && ury > lly => Ok((urx - llx, ury - lly)),
        _ => Ok(DEFAULT_PAGE_DIMENSIONS),
    }
}

/// Look up a page attribute on the page or its ancestors
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
