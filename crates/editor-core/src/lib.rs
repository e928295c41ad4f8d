//! Client-side editor logic
//!
//! Everything the browser editor decides — box placement and styling, the
//! pointer interaction state machine, per-page render sequencing, and the
//! conversion of placed boxes into placement actions — lives here as plain
//! Rust so it tests natively. The wasm layer is a thin wrapper that
//! forwards DOM events and byte buffers.

pub mod boxes;
pub mod error;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod merge_list;
pub mod render;
pub mod session;

pub use boxes::{BoxSet, CanvasRect, TextBox};
pub use error::EditorError;
pub use export::export_actions;
pub use geometry::Viewport;
pub use interaction::{Handle, Interaction};
pub use merge_list::{MergeItem, MergeList};
pub use render::RenderCoordinator;
pub use session::EditorSession;
