//! Test harness mirroring how an application wires the controller.
//!
//! Holds a controller, a Slint node model whose rows implement `MovableNode`,
//! and an event tracker. Helper methods simulate what the UI would report.

#![allow(dead_code)]

use super::EventTracker;
use node_group_editor::{MovableNode, NodeEditorController, NodeState, Point, Size, ThumbPosition};
use slint::{Model, SharedString, VecModel};
use std::rc::Rc;

/// Row type of the node model, as a Slint struct would generate it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRow {
    pub id: i32,
    pub title: SharedString,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z: i32,
}

impl NodeRow {
    pub fn new(id: i32, title: &str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { id, title: title.into(), x, y, width, height, z: 0 }
    }
}

impl MovableNode for NodeRow {
    fn id(&self) -> i32 {
        self.id
    }
    fn x(&self) -> f32 {
        self.x
    }
    fn y(&self) -> f32 {
        self.y
    }
    fn set_x(&mut self, x: f32) {
        self.x = x;
    }
    fn set_y(&mut self, y: f32) {
        self.y = y;
    }
    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
    fn size(&self) -> Option<(f32, f32)> {
        Some((self.width, self.height))
    }
    fn set_z_index(&mut self, z_index: i32) {
        self.z = z_index;
    }
    fn z_index(&self) -> Option<i32> {
        Some(self.z)
    }
}

pub struct GroupEditorHarness {
    pub ctrl: NodeEditorController,
    pub nodes: Rc<VecModel<NodeRow>>,
    pub tracker: EventTracker,
}

impl GroupEditorHarness {
    /// An empty editor.
    pub fn new() -> Self {
        let ctrl = NodeEditorController::new();
        let tracker = {
            let graph = ctrl.graph();
            let mut graph = graph.borrow_mut();
            EventTracker::attach(&mut graph)
        };
        Self { ctrl, nodes: Rc::new(VecModel::default()), tracker }
    }

    /// A comment at (0, 0) 400x300 with two nodes inside and one outside.
    ///
    /// Ids: comment 10, inside 1 and 2, outside 3.
    pub fn with_comment() -> Self {
        let harness = Self::new();
        harness.add_comment(10, 0.0, 0.0, 400.0, 300.0);
        harness.add_node(1, 20.0, 40.0, 100.0, 60.0);
        harness.add_node(2, 200.0, 120.0, 100.0, 60.0);
        harness.add_node(3, 600.0, 40.0, 100.0, 60.0);
        harness.tracker.clear();
        harness
    }

    pub fn add_node(&self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.ctrl
            .graph()
            .borrow_mut()
            .add_node(NodeState::node(id, Point::new(x, y), Size::new(w, h)).with_name(format!("Node {id}")));
        self.nodes.push(NodeRow::new(id, &format!("Node {id}"), x, y, w, h));
        self.sync();
    }

    pub fn add_comment(&self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.ctrl
            .graph()
            .borrow_mut()
            .add_node(NodeState::commenter(id, Point::new(x, y), Size::new(w, h)));
        self.nodes.push(NodeRow::new(id, "Comment", x, y, w, h));
        self.sync();
    }

    pub fn remove(&self, id: i32) {
        self.ctrl.graph().borrow_mut().remove_node(id);
        if let Some(index) = (0..self.nodes.row_count()).find(|&i| self.nodes.row_data(i).map(|r| r.id) == Some(id)) {
            self.nodes.remove(index);
        }
    }

    /// Simulate a full drag through the controller callbacks.
    pub fn drag(&self, id: i32, thumb: ThumbPosition, deltas: &[(f32, f32)]) -> bool {
        if !self.ctrl.drag_started_callback()(id, thumb.bits()) {
            return false;
        }
        let delta = self.ctrl.drag_delta_callback();
        for &(dx, dy) in deltas {
            delta(id, dx, dy);
            self.sync();
        }
        self.ctrl.drag_completed_callback()(id);
        self.sync();
        true
    }

    /// Simulate the UI reporting a node rectangle (screen space).
    pub fn report_rect(&self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.ctrl.node_rect_callback()(id, x, y, w, h);
        self.sync();
    }

    pub fn sync(&self) {
        self.ctrl.sync_positions_to_model(&self.nodes);
    }

    pub fn row(&self, id: i32) -> NodeRow {
        (0..self.nodes.row_count())
            .filter_map(|i| self.nodes.row_data(i))
            .find(|row| row.id == id)
            .unwrap_or_else(|| panic!("no row for node {id}"))
    }

    pub fn position(&self, id: i32) -> Point {
        self.ctrl.graph().borrow().node(id).map(|n| n.position).unwrap()
    }

    pub fn size(&self, id: i32) -> Size {
        self.ctrl.graph().borrow().node(id).map(|n| n.size).unwrap()
    }

    pub fn members(&self, group: i32) -> Vec<i32> {
        self.ctrl.graph().borrow().members(group)
    }

    pub fn z_index(&self, id: i32) -> i32 {
        self.ctrl.graph().borrow().z_index(id).unwrap()
    }
}
