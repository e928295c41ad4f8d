//! Multi-page render coordination
//!
//! Each page renders independently into its own canvas. A monotonically
//! increasing token per page decides which completion wins: only the result
//! carrying the latest token is kept, so overlapping renders of the same
//! page cannot flicker or leave a stale raster behind.

use crate::geometry::Viewport;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct PageState {
    /// Canvas element exists for this page
    has_surface: bool,
    /// Latest token handed out
    issued: u64,
    /// Latest token whose render finished
    completed: u64,
    viewport: Option<Viewport>,
}

/// Tracks render tokens and viewports for every page of the open document
#[derive(Debug, Clone, Default)]
pub struct RenderCoordinator {
    pages: HashMap<u32, PageState>,
}

impl RenderCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a page's canvas as mounted. Rendering requires a surface.
    pub fn register_surface(&mut self, page: u32) {
        self.pages.entry(page).or_default().has_surface = true;
    }

    pub fn has_surface(&self, page: u32) -> bool {
        self.pages.get(&page).is_some_and(|p| p.has_surface)
    }

    /// Begin a render and get its token, or `None` if the page has no
    /// surface yet. Starting a new render supersedes any outstanding one.
    pub fn begin_render(&mut self, page: u32) -> Option<u64> {
        let state = self.pages.get_mut(&page)?;
        if !state.has_surface {
            return None;
        }
        state.issued += 1;
        Some(state.issued)
    }

    /// Report a finished render. Returns whether the result is current; a
    /// stale token means the caller must throw its raster away.
    pub fn finish_render(&mut self, page: u32, token: u64, viewport: Viewport) -> bool {
        let Some(state) = self.pages.get_mut(&page) else {
            return false;
        };
        if token != state.issued {
            return false;
        }
        state.completed = token;
        // The viewport is fixed at the first successful render so box
        // coordinates stay valid for the whole session.
        if state.viewport.is_none() {
            state.viewport = Some(viewport);
        }
        true
    }

    pub fn viewport(&self, page: u32) -> Option<Viewport> {
        self.pages.get(&page).and_then(|p| p.viewport)
    }

    /// Whether any page has a render in flight. Pointer interactions are
    /// gated on this.
    pub fn is_rendering(&self) -> bool {
        self.pages.values().any(|p| p.issued > p.completed)
    }
}
