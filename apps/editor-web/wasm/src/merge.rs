//! Merge basket exposed to JavaScript
//!
//! Holds the uploaded documents in user order and produces the combined
//! PDF. Reordering and removal happen here so the UI only re-renders the
//! list it gets back from `itemsJson`.

use editor_core::MergeList;
use wasm_bindgen::prelude::*;

/// Ordered collection of PDFs waiting to be merged
#[wasm_bindgen]
pub struct MergeBasket {
    list: MergeList,
}

impl Default for MergeBasket {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MergeBasket {
    /// Create an empty basket
    #[wasm_bindgen(constructor)]
    pub fn new() -> MergeBasket {
        MergeBasket {
            list: MergeList::new(),
        }
    }

    /// Add a document to the end of the list. Returns its id.
    #[wasm_bindgen(js_name = addDocument)]
    pub fn add_document(&mut self, name: &str, bytes: &[u8]) -> Result<String, JsValue> {
        let page_count = stamp_core::get_page_count(bytes)
            .map_err(|e| JsValue::from_str(&format!("Parse error: {}", e)))?;
        Ok(self.list.add(name, page_count, bytes.to_vec()))
    }

    /// Remove a document by id
    #[wasm_bindgen(js_name = removeDocument)]
    pub fn remove_document(&mut self, id: &str) {
        self.list.remove(id);
    }

    /// Move a document one position earlier
    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self, id: &str) {
        self.list.move_up(id);
    }

    /// Move a document one position later
    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self, id: &str) {
        self.list.move_down(id);
    }

    /// Number of documents in the basket
    #[wasm_bindgen(getter, js_name = fileCount)]
    pub fn file_count(&self) -> usize {
        self.list.len()
    }

    /// Whether a merge can run (at least two documents)
    #[wasm_bindgen(js_name = canMerge)]
    pub fn can_merge(&self) -> bool {
        self.list.can_merge()
    }

    /// Current list as JSON: `[{id, name, pageCount}, ...]` in merge order
    #[wasm_bindgen(js_name = itemsJson)]
    pub fn items_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.list.items())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Merge the documents in their current order
    pub fn merge(&self) -> Result<js_sys::Uint8Array, JsValue> {
        let merged = stamp_core::merge_documents(self.list.payloads())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let array = js_sys::Uint8Array::new_with_length(merged.len() as u32);
        array.copy_from(&merged);
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object};

    fn create_test_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for _ in 0..num_pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
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
    fn basket_tracks_documents() {
        let mut basket = MergeBasket::new();
        assert!(!basket.can_merge());

        let a = basket.add_document("a.pdf", &create_test_pdf(2)).unwrap();
        assert!(!basket.can_merge());

        basket.add_document("b.pdf", &create_test_pdf(3)).unwrap();
        assert!(basket.can_merge());
        assert_eq!(basket.file_count(), 2);

        basket.remove_document(&a);
        assert_eq!(basket.file_count(), 1);
        assert!(!basket.can_merge());
    }

    #[test]
    fn basket_rejects_invalid_pdf() {
        let mut basket = MergeBasket::new();
        assert!(basket.add_document("bad.pdf", b"nope").is_err());
        assert_eq!(basket.file_count(), 0);
    }

    #[test]
    fn items_json_reflects_reordering() {
        let mut basket = MergeBasket::new();
        basket.add_document("a.pdf", &create_test_pdf(1)).unwrap();
        let b = basket.add_document("b.pdf", &create_test_pdf(1)).unwrap();
        basket.move_up(&b);

        let json = basket.items_json().unwrap();
        let b_pos = json.find("b.pdf").unwrap();
        let a_pos = json.find("a.pdf").unwrap();
        assert!(b_pos < a_pos);
    }
}
