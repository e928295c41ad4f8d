//! Text boxes on the page overlay
//!
//! Boxes live in canvas pixel space and are only converted to PDF points at
//! export time. At most one box is active (focused) at a time.

use serde::{Deserialize, Serialize};
use stamp_core::Align;
use uuid::Uuid;

/// Axis-aligned rectangle in canvas pixels, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corner points, in either order
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One placed text box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    pub id: String,
    /// 1-based page number, matching the preview's page list
    pub page: u32,
    pub rect: CanvasRect,
    pub text: String,
    pub font_family: String,
    /// Font size in points
    pub size: f64,
    pub color: String,
    pub bold: bool,
    pub align: Align,
}

impl TextBox {
    pub fn new(page: u32, rect: CanvasRect) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            page,
            rect,
            text: String::new(),
            font_family: "Helvetica".to_string(),
            size: 16.0,
            color: "#111111".to_string(),
            bold: false,
            align: Align::Left,
        }
    }
}

/// All boxes in a session plus the active-box focus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxSet {
    boxes: Vec<TextBox>,
    active: Option<String>,
}

impl BoxSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box and make it the active one. Returns its id.
    pub fn insert(&mut self, page: u32, rect: CanvasRect) -> String {
        let text_box = TextBox::new(page, rect);
        let id = text_box.id.clone();
        self.boxes.push(text_box);
        self.active = Some(id.clone());
        id
    }

    pub fn get(&self, id: &str) -> Option<&TextBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TextBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    pub fn boxes(&self) -> &[TextBox] {
        &self.boxes
    }

    pub fn boxes_on_page(&self, page: u32) -> Vec<&TextBox> {
        self.boxes.iter().filter(|b| b.page == page).collect()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&TextBox> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Focus a box; ignored if the id is unknown
    pub fn set_active(&mut self, id: &str) {
        if self.boxes.iter().any(|b| b.id == id) {
            self.active = Some(id.to_string());
        }
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn delete(&mut self, id: &str) {
        self.boxes.retain(|b| b.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    pub fn delete_active(&mut self) {
        if let Some(id) = self.active.take() {
            self.boxes.retain(|b| b.id != id);
        }
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
        self.active = None;
    }

    pub fn set_text(&mut self, id: &str, text: &str) {
        if let Some(b) = self.get_mut(id) {
            b.text = text.to_string();
        }
    }

    pub fn set_size(&mut self, id: &str, size: f64) {
        if let Some(b) = self.get_mut(id) {
            b.size = size;
        }
    }

    pub fn set_color(&mut self, id: &str, color: &str) {
        if let Some(b) = self.get_mut(id) {
            b.color = color.to_string();
        }
    }

    pub fn set_bold(&mut self, id: &str, bold: bool) {
        if let Some(b) = self.get_mut(id) {
            b.bold = bold;
        }
    }

    pub fn set_align(&mut self, id: &str, align: Align) {
        if let Some(b) = self.get_mut(id) {
            b.align = align;
        }
    }

    pub fn set_font_family(&mut self, id: &str, family: &str) {
        if let Some(b) = self.get_mut(id) {
            b.font_family = family.to_string();
        }
    }
}
