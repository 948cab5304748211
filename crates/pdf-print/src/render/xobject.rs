//! Form XObjects built from source pages
//!
//! A printed sheet draws its source page through a Form XObject, placed
//! with a transformation matrix that maps the page's MediaBox onto the
//! destination rectangle.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Page tree depth at which inherited attribute lookup gives up
const MAX_INHERITANCE_DEPTH: usize = 32;

/// MediaBox as [llx, lly, urx, ury] in points
pub type MediaBox = [f64; 4];

/// Wrap a source page as a Form XObject in `output`.
///
/// The page's (possibly inherited) Resources are deep-copied through
/// `cache`, so objects shared between pages land in the output once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    media_box: MediaBox,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page = source.get_dictionary(page_id)?;

    let mut form = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        (
            "BBox",
            Object::Array(media_box.iter().map(|&v| Object::Real(v as f32)).collect()),
        ),
    ]);

    if let Some(resources) = inherited_entry(source, page, b"Resources") {
        let copied = copy_object_deep(output, source, resources, cache)?;
        form.set("Resources", copied);
    }

    let content = page_content(source, page)?;
    Ok(output.add_object(Stream::new(form, content)))
}

/// Decoded content of a page, with multiple streams joined by newlines.
/// A page without Contents is blank.
fn page_content(doc: &Document, page: &Dictionary) -> Result<Vec<u8>> {
    let ids: Vec<ObjectId> = match page.get(b"Contents") {
        Ok(Object::Reference(id)) => vec![*id],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .collect(),
        _ => return Ok(Vec::new()),
    };

    let mut content = Vec::new();
    for (i, id) in ids.into_iter().enumerate() {
        let Ok(stream) = doc.get_object(id)?.as_stream() else {
            continue;
        };
        if i > 0 {
            content.push(b'\n');
        }
        match stream.decompressed_content() {
            Ok(data) => content.extend_from_slice(&data),
            Err(_) => content.extend_from_slice(&stream.content),
        }
    }
    Ok(content)
}

/// Copy `obj` into `output`, following references into `source`.
///
/// Each source object is copied at most once per cache. The output id is
/// reserved before the referenced object is visited, so reference cycles
/// (Parent links, for instance) terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    let copied = match obj {
        Object::Reference(id) => {
            if let Some(&known) = cache.get(id) {
                return Ok(Object::Reference(known));
            }
            let reserved = output.new_object_id();
            cache.insert(*id, reserved);

            let target = copy_object_deep(output, source, source.get_object(*id)?, cache)?;
            output.objects.insert(reserved, target);
            Object::Reference(reserved)
        }
        Object::Dictionary(dict) => {
            Object::Dictionary(copy_dictionary(output, source, dict, cache)?)
        }
        Object::Array(items) => Object::Array(
            items
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect::<Result<_>>()?,
        ),
        Object::Stream(stream) => {
            let mut copy = Stream::new(
                copy_dictionary(output, source, &stream.dict, cache)?,
                stream.content.clone(),
            );
            copy.allows_compression = stream.allows_compression;
            Object::Stream(copy)
        }
        other => other.clone(),
    };
    Ok(copied)
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut copy = Dictionary::new();
    for (key, value) in dict.iter() {
        copy.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(copy)
}

/// MediaBox of a page, following page tree inheritance.
///
/// The box is normalized so that the lower-left corner comes first. Pages
/// without a readable MediaBox are treated as US Letter.
pub fn get_media_box(doc: &Document, page_id: ObjectId) -> Result<MediaBox> {
    let page = doc.get_dictionary(page_id)?;

    let media_box = inherited_entry(doc, page, b"MediaBox")
        .and_then(|obj| resolve(doc, obj).as_array().ok())
        .filter(|arr| arr.len() == 4)
        .and_then(|arr| {
            let mut values = [0.0; 4];
            for (slot, obj) in values.iter_mut().zip(arr) {
                *slot = as_number(resolve(doc, obj))?;
            }
            Some(normalize(values))
        });

    let (width, height) = DEFAULT_PAGE_DIMENSIONS;
    Ok(media_box.unwrap_or([0.0, 0.0, width, height]))
}

fn normalize([x0, y0, x1, y1]: MediaBox) -> MediaBox {
    [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)]
}

/// Look up `key` on a page, then on its ancestors in the page tree
fn inherited_entry<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut dict = page;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        let parent_id = dict.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        dict = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match *obj {
        Object::Integer(i) => Some(i as f64),
        Object::Real(r) => Some(f64::from(r)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_box_inherited_from_page_tree() {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
        ]));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(vec![Object::Reference(page_id)])),
                ("Count", Object::Integer(1)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(842),
                        Object::Real(595.0),
                    ]),
                ),
            ])),
        );

        assert_eq!(get_media_box(&doc, page_id).unwrap(), [0.0, 0.0, 842.0, 595.0]);
    }

    #[test]
    fn test_inverted_media_box_is_normalized() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(612),
                    Object::Integer(792),
                    Object::Integer(0),
                    Object::Integer(0),
                ]),
            ),
        ]));

        assert_eq!(get_media_box(&doc, page_id).unwrap(), [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_missing_media_box_defaults_to_letter() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(Dictionary::from_iter(vec![(
            "Type",
            Object::Name(b"Page".to_vec()),
        )]));

        assert_eq!(get_media_box(&doc, page_id).unwrap(), [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_deep_copy_follows_cycles() {
        let mut source = Document::with_version("1.7");
        let a = source.new_object_id();
        let b = source.add_object(Dictionary::from_iter(vec![("Back", Object::Reference(a))]));
        source.objects.insert(
            a,
            Object::Dictionary(Dictionary::from_iter(vec![("Next", Object::Reference(b))])),
        );

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let copied =
            copy_object_deep(&mut output, &source, &Object::Reference(a), &mut cache).unwrap();

        assert_eq!(cache.len(), 2);
        let new_a = copied.as_reference().unwrap();
        let new_b = output
            .get_dictionary(new_a)
            .unwrap()
            .get(b"Next")
            .unwrap()
            .as_reference()
            .unwrap();
        let back = output
            .get_dictionary(new_b)
            .unwrap()
            .get(b"Back")
            .unwrap()
            .as_reference()
            .unwrap();
        assert_eq!(back, new_a);
    }
}
