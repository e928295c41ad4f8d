//! Pointer interaction state machine
//!
//! One interaction is in flight at a time: drawing a new box, moving an
//! existing one, or resizing by a corner handle. Deltas are always measured
//! from the pointer position at interaction start, never frame to frame, so
//! a fast pointer cannot make a box drift.

use crate::boxes::CanvasRect;

/// Smallest box a drag-create may produce
pub const MIN_CREATE_WIDTH: f64 = 60.0;
pub const MIN_CREATE_HEIGHT: f64 = 32.0;

/// Hard floor when resizing an existing box
pub const MIN_BOX_WIDTH: f64 = 40.0;
pub const MIN_BOX_HEIGHT: f64 = 24.0;

/// Corner being dragged during a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Handle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nw" => Some(Handle::Nw),
            "ne" => Some(Handle::Ne),
            "se" => Some(Handle::Se),
            "sw" => Some(Handle::Sw),
            _ => None,
        }
    }

    fn anchors_right_edge(&self) -> bool {
        matches!(self, Handle::Nw | Handle::Sw)
    }

    fn anchors_bottom_edge(&self) -> bool {
        matches!(self, Handle::Nw | Handle::Ne)
    }
}

/// The in-flight pointer interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    DragCreate {
        page: u32,
        origin: (f64, f64),
        current: (f64, f64),
    },
    Move {
        id: String,
        start: (f64, f64),
        start_rect: CanvasRect,
    },
    Resize {
        id: String,
        handle: Handle,
        start: (f64, f64),
        start_rect: CanvasRect,
    },
}

/// Clamp a pointer position onto the canvas
pub fn clamp_point(x: f64, y: f64, canvas_w: f64, canvas_h: f64) -> (f64, f64) {
    (x.clamp(0.0, canvas_w), y.clamp(0.0, canvas_h))
}

/// Marquee rectangle while a drag-create is in progress
pub fn drag_rect(origin: (f64, f64), current: (f64, f64)) -> CanvasRect {
    CanvasRect::from_corners(origin, current)
}

/// Final rectangle of a released drag-create: at least the minimum size,
/// pulled back inside the canvas if padding it out overflowed an edge.
pub fn created_rect(origin: (f64, f64), current: (f64, f64), canvas_w: f64, canvas_h: f64) -> CanvasRect {
    let mut rect = drag_rect(origin, current);
    rect.width = rect.width.max(MIN_CREATE_WIDTH);
    rect.height = rect.height.max(MIN_CREATE_HEIGHT);
    rect.x = rect.x.min(canvas_w - rect.width).max(0.0);
    rect.y = rect.y.min(canvas_h - rect.height).max(0.0);
    rect
}

/// Rectangle of a box being moved, with its position clamped so the whole
/// box stays on the canvas
pub fn moved_rect(
    start_rect: CanvasRect,
    start: (f64, f64),
    current: (f64, f64),
    canvas_w: f64,
    canvas_h: f64,
) -> CanvasRect {
    let dx = current.0 - start.0;
    let dy = current.1 - start.1;

    let mut rect = start_rect;
    rect.x = (start_rect.x + dx).clamp(0.0, (canvas_w - rect.width).max(0.0));
    rect.y = (start_rect.y + dy).clamp(0.0, (canvas_h - rect.height).max(0.0));
    rect
}

/// Rectangle of a box being resized by `handle`.
///
/// North/west handles move the origin while shrinking; south/east handles
/// only grow. The opposite corner stays anchored, the size never drops
/// below the floor, and the result is kept on the canvas.
pub fn resized_rect(
    start_rect: CanvasRect,
    handle: Handle,
    start: (f64, f64),
    current: (f64, f64),
    canvas_w: f64,
    canvas_h: f64,
) -> CanvasRect {
    let dx = current.0 - start.0;
    let dy = current.1 - start.1;

    let mut width = if handle.anchors_right_edge() {
        start_rect.width - dx
    } else {
        start_rect.width + dx
    };
    let mut height = if handle.anchors_bottom_edge() {
        start_rect.height - dy
    } else {
        start_rect.height + dy
    };
    width = width.max(MIN_BOX_WIDTH);
    height = height.max(MIN_BOX_HEIGHT);

    let mut x = if handle.anchors_right_edge() {
        start_rect.right() - width
    } else {
        start_rect.x
    };
    let mut y = if handle.anchors_bottom_edge() {
        start_rect.bottom() - height
    } else {
        start_rect.y
    };

    if x < 0.0 {
        width = (width + x).max(MIN_BOX_WIDTH);
        x = 0.0;
    }
    if y < 0.0 {
        height = (height + y).max(MIN_BOX_HEIGHT);
        y = 0.0;
    }
    if x + width > canvas_w {
        width = (canvas_w - x).max(MIN_BOX_WIDTH);
    }
    if y + height > canvas_h {
        height = (canvas_h - y).max(MIN_BOX_HEIGHT);
    }

    CanvasRect::new(x, y, width, height)
}
