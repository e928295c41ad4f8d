//! Editor session state
//!
//! One open document on the client: its pages, the render bookkeeping, the
//! placed text boxes, and whichever pointer interaction is in flight. All
//! pointer-event decisions live here so the thin UI layer only forwards
//! events and repaints.

use crate::boxes::{BoxSet, CanvasRect};
use crate::error::EditorError;
use crate::export::export_actions;
use crate::geometry::Viewport;
use crate::interaction::{
    clamp_point, created_rect, drag_rect, moved_rect, resized_rect, Handle, Interaction,
};
use crate::render::RenderCoordinator;
use stamp_core::{ActionList, Align};

pub struct EditorSession {
    file_name: String,
    page_count: u32,
    boxes: BoxSet,
    render: RenderCoordinator,
    interaction: Option<Interaction>,
    text_mode: bool,
}

impl EditorSession {
    pub fn new(file_name: &str, page_count: u32) -> Self {
        Self {
            file_name: file_name.to_string(),
            page_count,
            boxes: BoxSet::new(),
            render: RenderCoordinator::new(),
            interaction: None,
            text_mode: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn boxes(&self) -> &BoxSet {
        &self.boxes
    }

    pub fn set_text_mode(&mut self, enabled: bool) {
        self.text_mode = enabled;
    }

    pub fn text_mode(&self) -> bool {
        self.text_mode
    }

    // Render plumbing, delegated to the coordinator

    pub fn register_surface(&mut self, page: u32) {
        self.render.register_surface(page);
    }

    pub fn begin_render(&mut self, page: u32) -> Option<u64> {
        self.render.begin_render(page)
    }

    pub fn finish_render(&mut self, page: u32, token: u64, viewport: Viewport) -> bool {
        self.render.finish_render(page, token, viewport)
    }

    pub fn viewport(&self, page: u32) -> Option<Viewport> {
        self.render.viewport(page)
    }

    pub fn is_rendering(&self) -> bool {
        self.render.is_rendering()
    }

    // Pointer interactions. Each begin_* refuses to start unless the
    // session is idle, the page has a rendered viewport, and nothing is
    // mid-render.

    /// Start drawing a new box. Only valid in text mode.
    pub fn begin_drag_create(&mut self, page: u32, x: f64, y: f64) -> bool {
        if !self.text_mode || !self.can_start_interaction() {
            return false;
        }
        if page == 0 || page > self.page_count {
            return false;
        }
        let Some(vp) = self.render.viewport(page) else {
            return false;
        };

        let origin = clamp_point(x, y, vp.width_px, vp.height_px);
        self.interaction = Some(Interaction::DragCreate {
            page,
            origin,
            current: origin,
        });
        true
    }

    /// Start moving an existing box; focuses it as well
    pub fn begin_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !self.can_start_interaction() {
            return false;
        }
        let Some((rect, _)) = self.box_rect_and_viewport(id) else {
            return false;
        };

        self.boxes.set_active(id);
        self.interaction = Some(Interaction::Move {
            id: id.to_string(),
            start: (x, y),
            start_rect: rect,
        });
        true
    }

    /// Start resizing an existing box by a corner handle
    pub fn begin_resize(&mut self, id: &str, handle: Handle, x: f64, y: f64) -> bool {
        if !self.can_start_interaction() {
            return false;
        }
        let Some((rect, _)) = self.box_rect_and_viewport(id) else {
            return false;
        };

        self.boxes.set_active(id);
        self.interaction = Some(Interaction::Resize {
            id: id.to_string(),
            handle,
            start: (x, y),
            start_rect: rect,
        });
        true
    }

    /// Feed a pointer-move event into the in-flight interaction
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match self.interaction.clone() {
            Some(Interaction::DragCreate { page, origin, .. }) => {
                if let Some(vp) = self.render.viewport(page) {
                    let current = clamp_point(x, y, vp.width_px, vp.height_px);
                    self.interaction = Some(Interaction::DragCreate {
                        page,
                        origin,
                        current,
                    });
                }
            }
            Some(Interaction::Move {
                id,
                start,
                start_rect,
            }) => {
                if let Some((_, vp)) = self.box_rect_and_viewport(&id) {
                    let rect = moved_rect(start_rect, start, (x, y), vp.width_px, vp.height_px);
                    if let Some(b) = self.boxes.get_mut(&id) {
                        b.rect = rect;
                    }
                }
            }
            Some(Interaction::Resize {
                id,
                handle,
                start,
                start_rect,
            }) => {
                if let Some((_, vp)) = self.box_rect_and_viewport(&id) {
                    let rect =
                        resized_rect(start_rect, handle, start, (x, y), vp.width_px, vp.height_px);
                    if let Some(b) = self.boxes.get_mut(&id) {
                        b.rect = rect;
                    }
                }
            }
            None => {}
        }
    }

    /// End the in-flight interaction. Fires on pointer-up anywhere, even
    /// outside the box that started it. Returns the id of a newly created
    /// box when a drag-create completes.
    pub fn pointer_up(&mut self) -> Option<String> {
        match self.interaction.take()? {
            Interaction::DragCreate {
                page,
                origin,
                current,
            } => {
                let vp = self.render.viewport(page)?;
                let rect = created_rect(origin, current, vp.width_px, vp.height_px);
                Some(self.boxes.insert(page, rect))
            }
            Interaction::Move { .. } | Interaction::Resize { .. } => None,
        }
    }

    /// Marquee rectangle to paint while a drag-create is in progress
    pub fn drag_preview(&self) -> Option<CanvasRect> {
        match self.interaction {
            Some(Interaction::DragCreate {
                origin, current, ..
            }) => Some(drag_rect(origin, current)),
            _ => None,
        }
    }

    pub fn interaction_in_flight(&self) -> bool {
        self.interaction.is_some()
    }

    // Box editing, forwarded to the set

    pub fn set_active_box(&mut self, id: &str) {
        self.boxes.set_active(id);
    }

    pub fn clear_active_box(&mut self) {
        self.boxes.clear_active();
    }

    pub fn delete_box(&mut self, id: &str) {
        self.boxes.delete(id);
    }

    /// Delete the focused box and return to idle
    pub fn delete_active_box(&mut self) {
        self.boxes.delete_active();
        self.interaction = None;
    }

    /// Remove every box and return to idle
    pub fn clear_boxes(&mut self) {
        self.boxes.clear();
        self.interaction = None;
    }

    pub fn set_box_text(&mut self, id: &str, text: &str) {
        self.boxes.set_text(id, text);
    }

    pub fn set_box_size(&mut self, id: &str, size: f64) {
        self.boxes.set_size(id, size);
    }

    pub fn set_box_color(&mut self, id: &str, color: &str) {
        self.boxes.set_color(id, color);
    }

    pub fn set_box_bold(&mut self, id: &str, bold: bool) {
        self.boxes.set_bold(id, bold);
    }

    pub fn set_box_align(&mut self, id: &str, align: Align) {
        self.boxes.set_align(id, align);
    }

    pub fn set_box_font_family(&mut self, id: &str, family: &str) {
        self.boxes.set_font_family(id, family);
    }

    /// Produce the action list for the apply request
    pub fn export_actions(&self) -> Result<ActionList, EditorError> {
        export_actions(&self.boxes, &self.render)
    }

    fn can_start_interaction(&self) -> bool {
        self.interaction.is_none() && !self.render.is_rendering()
    }

    fn box_rect_and_viewport(&self, id: &str) -> Option<(CanvasRect, Viewport)> {
        let text_box = self.boxes.get(id)?;
        let vp = self.render.viewport(text_box.page)?;
        Some((text_box.rect, vp))
    }
}
