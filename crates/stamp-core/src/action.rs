//! Placement action schema
//!
//! The wire contract shared by the editor client and the server. Actions are
//! a tagged union over `type` so new kinds can be added without breaking
//! existing payloads. Order inside an [`ActionList`] is significant and is
//! preserved through replay.

use crate::error::StampError;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of text within its box width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A single edit to replay onto a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlacementAction {
    /// Draw styled text at a baseline position in PDF point space
    #[serde(rename_all = "camelCase")]
    AddText {
        /// 0-based page index
        page: u32,
        /// Baseline origin, points from the bottom-left corner
        x: f64,
        y: f64,
        text: String,
        #[serde(default = "default_size")]
        size: f64,
        /// Hex color, 3 or 6 digits, `#` optional. Unparseable values
        /// fall back to black.
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        align: Align,
        /// Box width in points. Required for center/right alignment to
        /// have any effect.
        #[serde(default)]
        width: Option<f64>,
        /// Distance between consecutive baselines. Defaults to size x 1.2.
        #[serde(default)]
        line_height: Option<f64>,
    },
}

fn default_size() -> f64 {
    12.0
}

/// Ordered list of actions, the body of an apply request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionList {
    pub actions: Vec<PlacementAction>,
}

impl ActionList {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Validate every action up front. The first violation fails the whole
    /// list; nothing is coerced or dropped.
    pub fn validate(&self) -> Result<(), StampError> {
        for (index, action) in self.actions.iter().enumerate() {
            if let Err(reason) = validate_action(action) {
                return Err(StampError::Validation { index, reason });
            }
        }
        Ok(())
    }
}

fn validate_action(action: &PlacementAction) -> Result<(), String> {
    match action {
        PlacementAction::AddText {
            x,
            y,
            text,
            size,
            width,
            line_height,
            ..
        } => {
            if text.is_empty() {
                return Err("text must not be empty".into());
            }
            if !x.is_finite() || !y.is_finite() {
                return Err("position must be finite".into());
            }
            if !size.is_finite() || *size <= 0.0 {
                return Err("size must be a positive number".into());
            }
            if let Some(w) = width {
                if !w.is_finite() || *w <= 0.0 {
                    return Err("width must be a positive number".into());
                }
            }
            if let Some(lh) = line_height {
                if !lh.is_finite() || *lh <= 0.0 {
                    return Err("lineHeight must be a positive number".into());
                }
            }
            Ok(())
        }
    }
}
