//! High-level controller for wiring a [`NodeGraph`] to a Slint window.
//!
//! The [`NodeEditorController`] owns the graph behind `Rc<RefCell<_>>` and hands
//! out closures shaped like the callbacks a Slint node editor declares. Geometry
//! from the UI arrives in screen space; the controller converts it to world space
//! using the current viewport before it reaches the graph.
//!
//! # Example
//!
//! ```ignore
//! use node_group_editor::NodeEditorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = NodeEditorController::new();
//!
//!     window.on_node_rect_changed(ctrl.node_rect_callback());
//!     window.on_node_drag_started(ctrl.drag_started_callback());
//!     window.on_node_drag_delta(ctrl.drag_delta_callback());
//!     window.on_node_drag_completed(ctrl.drag_completed_callback());
//!     window.on_group_mode_toggled(ctrl.group_mode_callback());
//!
//!     // Push positions back into the node model after every change
//!     let nodes = std::rc::Rc::new(slint::VecModel::<NodeData>::default());
//!     window.on_node_drag_delta({
//!         let ctrl = ctrl.clone();
//!         let nodes = nodes.clone();
//!         move |id, dx, dy| {
//!             ctrl.handle_drag_delta(id, dx, dy);
//!             ctrl.sync_positions_to_model(&nodes);
//!         }
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::EditorConfig;
use crate::geometry::{Point, Size, Vector};
use crate::graph::{MovableNode, NodeGraph};
use crate::resize::ThumbPosition;
use slint::{Model, VecModel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Controller that manages node graph state and provides callback implementations.
///
/// Clone this controller to share it across callbacks. Event handlers registered
/// on the graph run while the graph is borrowed and must not call back into the
/// controller.
#[derive(Clone)]
pub struct NodeEditorController {
    graph: Rc<RefCell<NodeGraph>>,
    zoom: Rc<Cell<f32>>,
    pan_x: Rc<Cell<f32>>,
    pan_y: Rc<Cell<f32>>,
}

impl Default for NodeEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeEditorController {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            graph: Rc::new(RefCell::new(NodeGraph::with_config(config))),
            zoom: Rc::new(Cell::new(1.0)),
            pan_x: Rc::new(Cell::new(0.0)),
            pan_y: Rc::new(Cell::new(0.0)),
        }
    }

    /// Get access to the graph.
    pub fn graph(&self) -> Rc<RefCell<NodeGraph>> {
        self.graph.clone()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.get()
    }

    /// Set viewport state used for screen→world conversion.
    pub fn set_viewport(&self, zoom: f32, pan_x: f32, pan_y: f32) {
        self.zoom.set(zoom);
        self.pan_x.set(pan_x);
        self.pan_y.set(pan_y);
    }

    fn scale(&self) -> f32 {
        let zoom = self.zoom.get();
        if zoom > 0.0 { zoom } else { 1.0 }
    }

    // === Callback factories ===

    /// Returns a callback for `node-rect-changed(id, x, y, width, height)`.
    pub fn node_rect_callback(&self) -> impl Fn(i32, f32, f32, f32, f32) + Clone {
        let ctrl = self.clone();
        move |id, x, y, w, h| ctrl.handle_node_rect(id, x, y, w, h)
    }

    /// Returns a callback for `node-drag-started(id, thumb)`, where `thumb` is the
    /// edge-flag code of [`ThumbPosition::bits`].
    pub fn drag_started_callback(&self) -> impl Fn(i32, i32) -> bool + Clone {
        let ctrl = self.clone();
        move |id, thumb| ctrl.handle_drag_started(id, thumb)
    }

    /// Returns a callback for `node-drag-delta(id, dx, dy)`.
    pub fn drag_delta_callback(&self) -> impl Fn(i32, f32, f32) + Clone {
        let ctrl = self.clone();
        move |id, dx, dy| ctrl.handle_drag_delta(id, dx, dy)
    }

    /// Returns a callback for `node-drag-completed(id)`.
    pub fn drag_completed_callback(&self) -> impl Fn(i32) + Clone {
        let ctrl = self.clone();
        move |id| ctrl.handle_drag_completed(id)
    }

    /// Returns a callback for `group-mode-toggled(id, enabled)`.
    pub fn group_mode_callback(&self) -> impl Fn(i32, bool) + Clone {
        let graph = self.graph.clone();
        move |id, enabled| {
            graph.borrow_mut().set_group_mode(id, enabled);
        }
    }

    /// Returns a callback for `node-clicked(id, shift)`.
    pub fn node_clicked_callback(&self) -> impl Fn(i32, bool) + Clone {
        let graph = self.graph.clone();
        move |id, shift| graph.borrow_mut().select(id, shift)
    }

    /// Returns a callback for `surround-selection()`; yields the new comment id or
    /// -1 when nothing is selected.
    pub fn surround_selection_callback(&self) -> impl Fn() -> i32 + Clone {
        let graph = self.graph.clone();
        move || graph.borrow_mut().surround_selection().unwrap_or(-1)
    }

    // === Direct handlers ===

    /// Handle a node rectangle reported by the UI in screen space.
    ///
    /// Size is applied before position so a comment re-derives membership with its
    /// final extent.
    pub fn handle_node_rect(&self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        let z = self.scale();
        let position = Point::new((x - self.pan_x.get()) / z, (y - self.pan_y.get()) / z);
        let size = Size::new(w / z, h / z);

        let mut graph = self.graph.borrow_mut();
        let Some(node) = graph.node(id) else { return };
        let (old_position, old_size) = (node.position, node.size);
        if old_size != size {
            graph.set_size(id, size);
        }
        if old_position != position {
            graph.set_position(id, position);
        }
    }

    /// Start a drag. Unknown thumb codes are refused.
    pub fn handle_drag_started(&self, id: i32, thumb: i32) -> bool {
        match ThumbPosition::from_bits(thumb) {
            Some(thumb) => self.graph.borrow_mut().begin_drag(id, thumb),
            None => {
                tracing::debug!(node = id, thumb, "unknown resize handle code");
                false
            }
        }
    }

    /// Feed a screen-space drag delta.
    pub fn handle_drag_delta(&self, id: i32, dx: f32, dy: f32) {
        let z = self.scale();
        self.graph.borrow_mut().drag_delta(id, Vector::new(dx / z, dy / z));
    }

    pub fn handle_drag_completed(&self, id: i32) {
        self.graph.borrow_mut().end_drag(id);
    }

    // === Model sync ===

    pub fn sync_positions_to_model<T: MovableNode>(&self, model: &VecModel<T>) {
        self.graph.borrow().sync_positions_to_model(model);
    }

    pub fn sync_members_to_model(&self, group_id: i32, model: &VecModel<i32>) {
        self.graph.borrow().sync_members_to_model(group_id, model);
    }

    pub fn sync_selection_to_model(&self, model: &VecModel<i32>) {
        self.graph.borrow().sync_selection_to_model(model);
    }

    /// Adopt a selection made in the UI, e.g. by a selection box.
    pub fn sync_selection_from_model(&self, model: &dyn Model<Data = i32>) {
        self.graph.borrow_mut().sync_selection_from_model(model);
    }
}
