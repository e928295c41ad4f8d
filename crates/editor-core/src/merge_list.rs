//! Ordered list of documents queued for merging
//!
//! The output page order is exactly this list's order, so reordering here
//! is the only way to control the merged result.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeItem {
    pub id: String,
    pub name: String,
    pub page_count: u32,
    #[serde(skip)]
    bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeList {
    items: Vec<MergeItem>,
}

impl MergeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and return its entry id
    pub fn add(&mut self, name: &str, page_count: u32, bytes: Vec<u8>) -> String {
        let id = Uuid::new_v4().to_string();
        self.items.push(MergeItem {
            id: id.clone(),
            name: name.to_string(),
            page_count,
            bytes,
        });
        id
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub fn items(&self) -> &[MergeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merging needs at least two documents
    pub fn can_merge(&self) -> bool {
        self.items.len() >= 2
    }

    /// Swap an item with its predecessor. The first item stays put.
    pub fn move_up(&mut self, id: &str) {
        if let Some(pos) = self.position(id) {
            if pos > 0 {
                self.items.swap(pos, pos - 1);
            }
        }
    }

    /// Swap an item with its successor. The last item stays put.
    pub fn move_down(&mut self, id: &str) {
        if let Some(pos) = self.position(id) {
            if pos + 1 < self.items.len() {
                self.items.swap(pos, pos + 1);
            }
        }
    }

    /// Document bytes in list order, ready for the merge engine
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.items.iter().map(|item| item.bytes.clone()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(names: &[&str]) -> (MergeList, Vec<String>) {
        let mut list = MergeList::new();
        let ids = names
            .iter()
            .map(|name| list.add(name, 1, name.as_bytes().to_vec()))
            .collect();
        (list, ids)
    }

    #[test]
    fn needs_two_documents_to_merge() {
        let (mut list, _) = list_with(&["a.pdf"]);
        assert!(!list.can_merge());
        list.add("b.pdf", 1, vec![]);
        assert!(list.can_merge());
    }

    #[test]
    fn move_up_swaps_with_predecessor() {
        let (mut list, ids) = list_with(&["a.pdf", "b.pdf", "c.pdf"]);
        list.move_up(&ids[2]);
        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf", "b.pdf"]);
    }

    #[test]
    fn move_up_on_first_item_is_a_noop() {
        let (mut list, ids) = list_with(&["a.pdf", "b.pdf"]);
        list.move_up(&ids[0]);
        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn move_down_on_last_item_is_a_noop() {
        let (mut list, ids) = list_with(&["a.pdf", "b.pdf"]);
        list.move_down(&ids[1]);
        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn payloads_follow_list_order() {
        let (mut list, ids) = list_with(&["a", "b", "c"]);
        list.move_down(&ids[0]);
        let payloads = list.payloads();
        assert_eq!(payloads, vec![b"b".to_vec(), b"a".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn remove_drops_only_the_target() {
        let (mut list, ids) = list_with(&["a.pdf", "b.pdf", "c.pdf"]);
        list.remove(&ids[1]);
        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }
}
