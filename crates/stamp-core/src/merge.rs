//! Document merge
//!
//! Concatenates the pages of two or more documents in the order the caller
//! supplies them. Object IDs from each subsequent source are shifted past
//! the destination's highest ID so the object graphs can coexist, then all
//! internal references are rewritten to match.

use crate::error::StampError;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Merge the given documents into one, preserving input order and each
/// source's internal page order. Fewer than two inputs is rejected before
/// any parsing happens.
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, StampError> {
    if documents.len() < 2 {
        return Err(StampError::MergeError(
            "merge requires at least two documents".into(),
        ));
    }

    let mut sources = Vec::with_capacity(documents.len());
    for (i, bytes) in documents.iter().enumerate() {
        let doc = Document::load_mem(bytes)
            .map_err(|e| StampError::ParseError(format!("document {}: {}", i, e)))?;
        sources.push(doc);
    }

    // The first document becomes the destination; the rest are grafted in.
    let mut dest = sources.remove(0);
    let mut next_free_id = dest.max_id;
    let mut page_order = ordered_page_ids(&dest);

    for source in sources {
        let source_pages = ordered_page_ids(&source);
        let offset = next_free_id;

        let mut shifted = BTreeMap::new();
        for (old_id, object) in source.objects.into_iter() {
            shifted.insert((old_id.0 + offset, old_id.1), shift_references(object, offset));
        }
        dest.objects.extend(shifted);

        for page_id in source_pages {
            page_order.push((page_id.0 + offset, page_id.1));
        }

        next_free_id = (source.max_id + offset).max(next_free_id);
    }

    rewrite_page_tree(&mut dest, page_order)?;
    dest.max_id = next_free_id;
    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer)
        .map_err(|e| StampError::MergeError(format!("failed to save merged PDF: {}", e)))?;

    Ok(buffer)
}

/// Page object IDs in document page order
fn ordered_page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Recursively shift every reference inside an object by the ID offset
fn shift_references(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|item| shift_references(item, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's page tree at the combined page list
fn rewrite_page_tree(doc: &mut Document, page_order: Vec<ObjectId>) -> Result<(), StampError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| StampError::MergeError("trailer has no Root reference".into()))?;

    let pages_id = doc
        .get_object(catalog_id)
        .and_then(Object::as_dict)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| StampError::MergeError("catalog has no Pages reference".into()))?;

    let Some(Object::Dictionary(pages_dict)) = doc.objects.get_mut(&pages_id) else {
        return Err(StampError::MergeError("invalid pages dictionary".into()));
    };

    let kids: Vec<Object> = page_order.iter().map(|&id| Object::Reference(id)).collect();
    pages_dict.set("Count", Object::Integer(page_order.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));

    // Every page now hangs off the destination root node.
    for page_id in page_order {
        if let Some(Object::Dictionary(page)) = doc.objects.get_mut(&page_id) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Build a small PDF with identifiable per-page content
    fn create_test_pdf(num_pages: u32, prefix: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids = Vec::new();
        for page_num in 0..num_pages {
            let content = format!(
                "BT /F1 12 Tf 50 700 Td ({}-Page-{}) Tj ET",
                prefix,
                page_num + 1
            );
            let content_id = doc.add_object(Object::Stream(Stream::new(
                lopdf::Dictionary::new(),
                content.into_bytes(),
            )));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                },
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => num_pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn rejects_empty_input() {
        let result = merge_documents(vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_single_document() {
        let pdf = create_test_pdf(3, "Lonely");
        let result = merge_documents(vec![pdf]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at least two documents"));
    }

    #[test]
    fn combines_pages_of_two_documents() {
        let doc_a = create_test_pdf(2, "DocA");
        let doc_b = create_test_pdf(3, "DocB");

        let merged = merge_documents(vec![doc_a, doc_b]).unwrap();

        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 5);
    }

    #[test]
    fn preserves_input_order() {
        let first = create_test_pdf(2, "First");
        let second = create_test_pdf(1, "Second");
        let third = create_test_pdf(3, "Third");

        let merged = merge_documents(vec![first, second, third]).unwrap();

        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 6);

        let expected = [
            "First-Page-1",
            "First-Page-2",
            "Second-Page-1",
            "Third-Page-1",
            "Third-Page-2",
            "Third-Page-3",
        ];
        for (page_num, marker) in (1u32..).zip(expected) {
            let text = doc.extract_text(&[page_num]).unwrap_or_default();
            assert!(
                text.contains(marker),
                "page {} should contain {}, got {:?}",
                page_num,
                marker,
                text
            );
        }
    }

    #[test]
    fn merged_output_is_loadable() {
        let doc_a = create_test_pdf(1, "A");
        let doc_b = create_test_pdf(1, "B");

        let merged = merge_documents(vec![doc_a, doc_b]).unwrap();
        assert!(merged.starts_with(b"%PDF-"));
        assert!(Document::load_mem(&merged).is_ok());
    }

    #[test]
    fn handles_many_documents() {
        let docs: Vec<Vec<u8>> = (0..5)
            .map(|i| create_test_pdf(1, &format!("Doc{}", i)))
            .collect();

        let merged = merge_documents(docs).unwrap();
        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 5);
    }
}
