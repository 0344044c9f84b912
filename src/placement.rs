//! One-shot placement requests for freshly created nodes.
//!
//! The embedding layer may attach an [`InitialPlacement`] when it creates a node
//! (for example "surround the selection with a comment"). The graph consumes it the
//! first time the node is realized and never looks at it again.

use crate::geometry::{Point, Rect, Size, Vector};
use serde::{Deserialize, Serialize};

/// Frame between a comment node's outer bounds and its content area.
///
/// `top` covers the header (name label) plus a small gap, `bottom` the space kept
/// under the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementInsets {
    pub left: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for PlacementInsets {
    fn default() -> Self {
        Self { left: 8.0, top: 28.0, bottom: 20.0 }
    }
}

/// Position, optional content size, and whether to start editing the name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialPlacement {
    pub position: Point,
    pub size: Option<Size>,
    pub name_editing: bool,
}

impl InitialPlacement {
    /// Place the node at `position`, keeping its current size.
    pub fn at(position: Point) -> Self {
        Self { position, size: None, name_editing: false }
    }

    /// Request a comment whose content area covers `content`, with name editing on.
    pub fn surrounding(content: Rect) -> Self {
        Self {
            position: content.position(),
            size: Some(content.size()),
            name_editing: true,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_name_editing(mut self, name_editing: bool) -> Self {
        self.name_editing = name_editing;
        self
    }

    /// Outer position and size for the node.
    ///
    /// Without a size the position is used as-is and the size is left to the
    /// caller. With a size, the request describes the content area and the frame
    /// given by `insets` is added around it.
    pub fn resolve(&self, insets: &PlacementInsets) -> (Point, Option<Size>) {
        match self.size {
            None => (self.position, None),
            Some(content) => {
                let position = self.position - Vector::new(insets.left, insets.top);
                let size = Size::new(
                    content.width + insets.left * 2.0,
                    content.height + insets.top + insets.bottom,
                );
                (position, Some(size))
            }
        }
    }
}
