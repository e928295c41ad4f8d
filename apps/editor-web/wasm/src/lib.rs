//! WASM bindings for the PDF text editor
//!
//! All editor state lives in Rust: the open document, the text boxes, the
//! pointer interaction, and the per-page render bookkeeping. JavaScript
//! forwards pointer events and drives pdf.js renders into the canvases;
//! everything it needs to paint comes back as JSON.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { EditorSession, MergeBasket } from './pkg/editor_wasm.js';
//!
//! await init();
//!
//! const session = new EditorSession("contract.pdf", bytes);
//! session.registerSurface(1);
//! const token = session.beginRender(1);
//! // ... render with pdf.js at scale 1.5 ...
//! session.finishRender(1, token, canvas.width, canvas.height, 1.5);
//!
//! session.setTextMode(true);
//! session.beginDragCreate(1, e.offsetX, e.offsetY);
//! session.pointerMove(e.offsetX, e.offsetY);
//! const boxId = session.pointerUp();
//! session.setBoxText(boxId, "Hello");
//!
//! const actions = session.exportActionsJson();
//! // POST multipart { file, actions } to /api/pdf/apply
//! ```

pub mod editor;
pub mod merge;

use wasm_bindgen::prelude::*;

pub use editor::EditorSession;
pub use merge::MergeBasket;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get page count from PDF bytes without creating a session
#[wasm_bindgen]
pub fn get_page_count(bytes: &[u8]) -> Result<u32, JsValue> {
    stamp_core::get_page_count(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}
