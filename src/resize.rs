//! Resize geometry for the eight resize handles of a node.
//!
//! Dragging a handle on the bottom or right edge grows the node by the drag delta.
//! Dragging a handle on the top or left edge grows the node by the *negated* delta
//! and moves the node by the delta, so the opposite edge stays put. A size floor,
//! captured the first time a node is resized, stops the node from shrinking below
//! its original rendered size.
//!
//! # Example
//!
//! ```
//! use node_group_editor::geometry::{Size, Vector};
//! use node_group_editor::resize::{ResizeState, ThumbPosition};
//!
//! let mut state = ResizeState::default();
//! state.begin(Size::new(120.0, 50.0));
//!
//! // Drag the top edge 30 units up
//! let outcome = state.apply(ThumbPosition::Top, Vector::new(0.0, -30.0));
//! assert_eq!(outcome.min_size, Size::new(120.0, 80.0));
//! assert_eq!(outcome.position_delta, Vector::new(0.0, -30.0));
//! ```

use crate::geometry::{Size, Vector};

const TOP: i32 = 1;
const RIGHT: i32 = 2;
const BOTTOM: i32 = 4;
const LEFT: i32 = 8;

/// Which handle a drag is attached to. `None` is a drag on the node body.
///
/// Every handle has its own position; the integer codes from [`bits`](Self::bits)
/// combine edge flags (top = 1, right = 2, bottom = 4, left = 8) and are what the
/// Slint side passes through callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThumbPosition {
    #[default]
    None,
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ThumbPosition {
    pub const ALL_HANDLES: [ThumbPosition; 8] = [
        ThumbPosition::Top,
        ThumbPosition::Right,
        ThumbPosition::Bottom,
        ThumbPosition::Left,
        ThumbPosition::TopLeft,
        ThumbPosition::TopRight,
        ThumbPosition::BottomLeft,
        ThumbPosition::BottomRight,
    ];

    pub fn bits(self) -> i32 {
        match self {
            ThumbPosition::None => 0,
            ThumbPosition::Top => TOP,
            ThumbPosition::Right => RIGHT,
            ThumbPosition::Bottom => BOTTOM,
            ThumbPosition::Left => LEFT,
            ThumbPosition::TopLeft => TOP | LEFT,
            ThumbPosition::TopRight => TOP | RIGHT,
            ThumbPosition::BottomLeft => BOTTOM | LEFT,
            ThumbPosition::BottomRight => BOTTOM | RIGHT,
        }
    }

    /// Decode an edge-flag combination. Opposing edges (e.g. top and bottom) are
    /// not a handle and yield `None`.
    pub fn from_bits(bits: i32) -> Option<Self> {
        match bits {
            0 => Some(ThumbPosition::None),
            TOP => Some(ThumbPosition::Top),
            RIGHT => Some(ThumbPosition::Right),
            BOTTOM => Some(ThumbPosition::Bottom),
            LEFT => Some(ThumbPosition::Left),
            b if b == TOP | LEFT => Some(ThumbPosition::TopLeft),
            b if b == TOP | RIGHT => Some(ThumbPosition::TopRight),
            b if b == BOTTOM | LEFT => Some(ThumbPosition::BottomLeft),
            b if b == BOTTOM | RIGHT => Some(ThumbPosition::BottomRight),
            _ => None,
        }
    }

    pub fn is_body(self) -> bool {
        self == ThumbPosition::None
    }

    pub fn affects_horizontal(self) -> bool {
        self.bits() & (LEFT | RIGHT) != 0
    }

    pub fn affects_vertical(self) -> bool {
        self.bits() & (TOP | BOTTOM) != 0
    }

    /// The left edge moves, so horizontal growth must shift the node.
    pub fn anchors_left(self) -> bool {
        self.bits() & LEFT != 0
    }

    /// The top edge moves, so vertical growth must shift the node.
    pub fn anchors_top(self) -> bool {
        self.bits() & TOP != 0
    }

    /// Whether dragging this handle changes the node's position.
    pub fn moves_position(self) -> bool {
        self.anchors_left() || self.anchors_top()
    }
}

/// Axes along which a node may be resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeOrientation {
    None,
    #[default]
    Horizontal,
    Vertical,
    HorizontalAndVertical,
}

impl ResizeOrientation {
    pub fn horizontal(self) -> bool {
        matches!(self, ResizeOrientation::Horizontal | ResizeOrientation::HorizontalAndVertical)
    }

    pub fn vertical(self) -> bool {
        matches!(self, ResizeOrientation::Vertical | ResizeOrientation::HorizontalAndVertical)
    }

    /// A handle is usable only if every axis it touches is resizable. Body drags
    /// are always allowed.
    pub fn allows(self, thumb: ThumbPosition) -> bool {
        (!thumb.affects_horizontal() || self.horizontal())
            && (!thumb.affects_vertical() || self.vertical())
    }
}

/// New minimum extent after a drag step.
///
/// For each affected axis the extent grows by `change` (or by `-change` when the
/// dragged edge is the near edge, `anchored_far`), then is clamped to `floor`.
/// Unaffected axes pass through.
pub fn apply_resize(
    current_min: Size,
    change: Vector,
    affect_horizontal: bool,
    affect_vertical: bool,
    anchored_far: bool,
    floor: Size,
) -> Size {
    let mut result = current_min;
    if affect_horizontal {
        let width = if anchored_far {
            current_min.width - change.x
        } else {
            current_min.width + change.x
        };
        result.width = width.max(floor.width);
    }
    if affect_vertical {
        let height = if anchored_far {
            current_min.height - change.y
        } else {
            current_min.height + change.y
        };
        result.height = height.max(floor.height);
    }
    result
}

/// Delta by which a top/left handle may move the node.
///
/// Per affected axis the delta is zeroed when applying it would take the extent to
/// or below the floor; otherwise the raw delta passes. Unaffected axes are zero.
pub fn clamp_drag_delta(
    raw: Vector,
    affect_horizontal: bool,
    affect_vertical: bool,
    floor: Size,
    current_min: Size,
) -> Vector {
    let mut clamped = Vector::ZERO;
    if affect_horizontal && current_min.width - raw.x > floor.width {
        clamped.x = raw.x;
    }
    if affect_vertical && current_min.height - raw.y > floor.height {
        clamped.y = raw.y;
    }
    clamped
}

/// Result of one drag step on a resize handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub min_size: Size,
    /// Amount the caller must move the node by to keep the far edge fixed.
    pub position_delta: Vector,
}

/// Evaluate one drag step for any handle.
///
/// Near-edge axes (top, left) use the clamped delta and contribute it to the
/// position delta; far-edge axes (bottom, right) use the raw delta. Body drags
/// leave the size alone and report no position delta.
pub fn resize_for_thumb(thumb: ThumbPosition, current_min: Size, raw: Vector, floor: Size) -> ResizeOutcome {
    let near_h = thumb.affects_horizontal() && thumb.anchors_left();
    let near_v = thumb.affects_vertical() && thumb.anchors_top();
    let far_h = thumb.affects_horizontal() && !near_h;
    let far_v = thumb.affects_vertical() && !near_v;

    let clamped = clamp_drag_delta(raw, near_h, near_v, floor, current_min);

    let mut min_size = current_min;
    if near_h || near_v {
        min_size = apply_resize(min_size, clamped, near_h, near_v, true, floor);
    }
    if far_h || far_v {
        min_size = apply_resize(min_size, raw, far_h, far_v, false, floor);
    }

    ResizeOutcome { min_size, position_delta: clamped }
}

/// Per-node resize bookkeeping that outlives a single drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeState {
    floor: Option<Size>,
    min_size: Size,
}

impl ResizeState {
    /// Prepare for a resize drag on a node currently rendered at `rendered`.
    ///
    /// The first call records `rendered` as the floor and as the working minimum.
    /// Later calls keep the floor and [`sync`](Self::sync) the minimum to
    /// `rendered`. Returns the floor.
    pub fn begin(&mut self, rendered: Size) -> Size {
        match self.floor {
            Some(floor) => {
                self.sync(rendered);
                floor
            }
            None => {
                self.floor = Some(rendered);
                self.min_size = rendered;
                rendered
            }
        }
    }

    /// Follow a size change made outside a drag. The working minimum becomes
    /// `rendered`, raised to the floor on each axis.
    pub fn sync(&mut self, rendered: Size) {
        self.min_size = match self.floor {
            Some(floor) => Size::new(rendered.width.max(floor.width), rendered.height.max(floor.height)),
            None => rendered,
        };
    }

    /// Apply one drag step and remember the resulting minimum.
    ///
    /// Without a recorded floor the current minimum serves as one.
    pub fn apply(&mut self, thumb: ThumbPosition, raw: Vector) -> ResizeOutcome {
        let floor = self.floor.unwrap_or(self.min_size);
        let outcome = resize_for_thumb(thumb, self.min_size, raw, floor);
        self.min_size = outcome.min_size;
        tracing::trace!(?thumb, ?raw, ?outcome, "resize step");
        outcome
    }

    pub fn floor(&self) -> Option<Size> {
        self.floor
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }
}

/// Ephemeral state of one drag, from drag-start to drag-complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub thumb: ThumbPosition,
    pub accumulated: Vector,
}

impl DragSession {
    pub fn new(thumb: ThumbPosition) -> Self {
        Self { thumb, accumulated: Vector::ZERO }
    }

    pub fn record(&mut self, delta: Vector) {
        self.accumulated += delta;
    }
}
