//! Editor session exposed to JavaScript
//!
//! Thin wrapper over `editor_core::EditorSession`: owns the document bytes
//! for pdf.js and forwards pointer events into the core state machine.

use editor_core::{EditorSession as CoreSession, Handle, Viewport};
use stamp_core::Align;
use wasm_bindgen::prelude::*;

fn parse_align(s: &str) -> Option<Align> {
    match s {
        "left" => Some(Align::Left),
        "center" => Some(Align::Center),
        "right" => Some(Align::Right),
        _ => None,
    }
}

/// Session for editing a single PDF document
#[wasm_bindgen]
pub struct EditorSession {
    document_bytes: Vec<u8>,
    session: CoreSession,
}

#[wasm_bindgen]
impl EditorSession {
    /// Create a new editor session with the given PDF
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, bytes: &[u8]) -> Result<EditorSession, JsValue> {
        let page_count = stamp_core::get_page_count(bytes)
            .map_err(|e| JsValue::from_str(&format!("Parse error: {}", e)))?;

        Ok(EditorSession {
            document_bytes: bytes.to_vec(),
            session: CoreSession::new(name, page_count),
        })
    }

    /// Get page count
    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.session.page_count()
    }

    /// Get document name
    #[wasm_bindgen(getter, js_name = documentName)]
    pub fn document_name(&self) -> String {
        self.session.file_name().to_string()
    }

    /// Suggested download name for the edited copy
    #[wasm_bindgen(getter, js_name = editedFileName)]
    pub fn edited_file_name(&self) -> String {
        format!("edited_{}", self.session.file_name())
    }

    /// Get document bytes for pdf.js rendering
    #[wasm_bindgen(js_name = getDocumentBytes)]
    pub fn get_document_bytes(&self) -> js_sys::Uint8Array {
        let array = js_sys::Uint8Array::new_with_length(self.document_bytes.len() as u32);
        array.copy_from(&self.document_bytes);
        array
    }

    // Render coordination

    /// Mark a page's canvas as mounted
    #[wasm_bindgen(js_name = registerSurface)]
    pub fn register_surface(&mut self, page: u32) {
        self.session.register_surface(page);
    }

    /// Begin a render of a page; returns its token, or undefined if the
    /// page has no canvas yet
    #[wasm_bindgen(js_name = beginRender)]
    pub fn begin_render(&mut self, page: u32) -> Option<u64> {
        self.session.begin_render(page)
    }

    /// Report a finished render. Returns false when the token is stale
    /// and the raster must be discarded.
    #[wasm_bindgen(js_name = finishRender)]
    pub fn finish_render(
        &mut self,
        page: u32,
        token: u64,
        width_px: f64,
        height_px: f64,
        scale: f64,
    ) -> bool {
        self.session
            .finish_render(page, token, Viewport::new(width_px, height_px, scale))
    }

    /// Whether any page render is in flight
    #[wasm_bindgen(getter, js_name = isRendering)]
    pub fn is_rendering(&self) -> bool {
        self.session.is_rendering()
    }

    // Pointer events

    /// Enable or disable text placement mode
    #[wasm_bindgen(js_name = setTextMode)]
    pub fn set_text_mode(&mut self, enabled: bool) {
        self.session.set_text_mode(enabled);
    }

    /// Pointer down on empty canvas in text mode
    #[wasm_bindgen(js_name = beginDragCreate)]
    pub fn begin_drag_create(&mut self, page: u32, x: f64, y: f64) -> bool {
        self.session.begin_drag_create(page, x, y)
    }

    /// Pointer down on a box body
    #[wasm_bindgen(js_name = beginMove)]
    pub fn begin_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.session.begin_move(id, x, y)
    }

    /// Pointer down on a corner handle ("nw", "ne", "se", "sw")
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&mut self, id: &str, handle: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let handle = Handle::parse(handle)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid handle: {}", handle)))?;
        Ok(self.session.begin_resize(id, handle, x, y))
    }

    /// Pointer moved anywhere on the page
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.pointer_move(x, y);
    }

    /// Pointer released anywhere. Returns the id of a newly created box
    /// when a drag-create completes.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Option<String> {
        self.session.pointer_up()
    }

    /// Marquee rectangle while drawing a new box, as JSON or undefined
    #[wasm_bindgen(js_name = dragPreview)]
    pub fn drag_preview(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.drag_preview())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    // Box editing

    /// Get all boxes on a page as JSON
    #[wasm_bindgen(js_name = getBoxesJson)]
    pub fn get_boxes_json(&self, page: u32) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.boxes().boxes_on_page(page))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Id of the focused box, if any
    #[wasm_bindgen(getter, js_name = activeBoxId)]
    pub fn active_box_id(&self) -> Option<String> {
        self.session.boxes().active_id().map(|s| s.to_string())
    }

    #[wasm_bindgen(js_name = setActiveBox)]
    pub fn set_active_box(&mut self, id: &str) {
        self.session.set_active_box(id);
    }

    #[wasm_bindgen(js_name = clearActiveBox)]
    pub fn clear_active_box(&mut self) {
        self.session.clear_active_box();
    }

    #[wasm_bindgen(js_name = deleteBox)]
    pub fn delete_box(&mut self, id: &str) {
        self.session.delete_box(id);
    }

    #[wasm_bindgen(js_name = deleteActiveBox)]
    pub fn delete_active_box(&mut self) {
        self.session.delete_active_box();
    }

    #[wasm_bindgen(js_name = clearBoxes)]
    pub fn clear_boxes(&mut self) {
        self.session.clear_boxes();
    }

    #[wasm_bindgen(js_name = setBoxText)]
    pub fn set_box_text(&mut self, id: &str, text: &str) {
        self.session.set_box_text(id, text);
    }

    #[wasm_bindgen(js_name = setBoxSize)]
    pub fn set_box_size(&mut self, id: &str, size: f64) {
        self.session.set_box_size(id, size);
    }

    #[wasm_bindgen(js_name = setBoxColor)]
    pub fn set_box_color(&mut self, id: &str, color: &str) {
        self.session.set_box_color(id, color);
    }

    #[wasm_bindgen(js_name = setBoxBold)]
    pub fn set_box_bold(&mut self, id: &str, bold: bool) {
        self.session.set_box_bold(id, bold);
    }

    /// Set alignment: "left", "center" or "right"
    #[wasm_bindgen(js_name = setBoxAlign)]
    pub fn set_box_align(&mut self, id: &str, align: &str) -> Result<(), JsValue> {
        let align = parse_align(align)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid alignment: {}", align)))?;
        self.session.set_box_align(id, align);
        Ok(())
    }

    #[wasm_bindgen(js_name = setBoxFontFamily)]
    pub fn set_box_font_family(&mut self, id: &str, family: &str) {
        self.session.set_box_font_family(id, family);
    }

    /// Export the action list for the apply request, as JSON
    #[wasm_bindgen(js_name = exportActionsJson)]
    pub fn export_actions_json(&self) -> Result<String, JsValue> {
        let list = self
            .session
            .export_actions()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&list)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
