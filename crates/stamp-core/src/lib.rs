//! PDF text stamping and merge
//!
//! The shared core behind the editor client and the HTTP server: the
//! placement action contract, the engine that replays actions onto a
//! document, and the document merge. Both sides depend on this crate so
//! the canvas preview and the server output agree byte for byte on what
//! an action means.

pub mod action;
pub mod apply;
pub mod color;
pub mod error;
pub mod font;
pub mod merge;

pub use action::{ActionList, Align, PlacementAction};
pub use apply::{apply_actions, ApplyOutcome};
pub use error::StampError;
pub use merge::merge_documents;

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, StampError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| StampError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

/// Parse an action list from its JSON wire form
pub fn parse_action_list(json: &str) -> Result<ActionList, StampError> {
    serde_json::from_str(json).map_err(|e| StampError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_action_list_round_trips() {
        let json = r#"{"actions":[{"type":"addText","page":0,"x":72.0,"y":700.0,"text":"Hi"}]}"#;
        let list = parse_action_list(json).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn parse_action_list_rejects_malformed_json() {
        assert!(parse_action_list("{not json").is_err());
        assert!(parse_action_list(r#"{"actions":"nope"}"#).is_err());
    }

    #[test]
    fn page_count_rejects_garbage() {
        assert!(get_page_count(b"not a pdf").is_err());
    }
}
