use std::collections::HashMap;

use slint::SharedString;

use crate::containment::NodeGeometry;
use crate::events::NodeEvent;
use crate::geometry::{Point, Rect, Size};
use crate::group::NodeStore;
use crate::placement::InitialPlacement;
use crate::resize::{ResizeOrientation, ResizeState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Node,
    /// A comment box that groups the nodes it contains.
    Commenter,
}

/// Editor-side state of one node.
#[derive(Clone, Debug)]
pub struct NodeState {
    pub id: i32,
    pub name: SharedString,
    pub kind: NodeKind,
    pub position: Point,
    pub size: Size,
    /// Stacking order when unselected; selected nodes render one layer higher.
    pub base_z_index: i32,
    pub selected: bool,
    pub resizable: ResizeOrientation,
    pub resize: ResizeState,
    /// Placement request consumed once when the node is realized.
    pub pending_placement: Option<InitialPlacement>,
    pub editing_name: bool,
}

impl NodeState {
    pub fn new(id: i32, kind: NodeKind, position: Point, size: Size) -> Self {
        let resizable = match kind {
            NodeKind::Node => ResizeOrientation::Horizontal,
            NodeKind::Commenter => ResizeOrientation::HorizontalAndVertical,
        };
        Self {
            id,
            name: SharedString::default(),
            kind,
            position,
            size,
            base_z_index: 0,
            selected: false,
            resizable,
            resize: ResizeState::default(),
            pending_placement: None,
            editing_name: false,
        }
    }

    pub fn node(id: i32, position: Point, size: Size) -> Self {
        Self::new(id, NodeKind::Node, position, size)
    }

    pub fn commenter(id: i32, position: Point, size: Size) -> Self {
        Self::new(id, NodeKind::Commenter, position, size)
    }

    pub fn with_name(mut self, name: impl Into<SharedString>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placement(mut self, placement: InitialPlacement) -> Self {
        self.pending_placement = Some(placement);
        self
    }

    pub fn with_resizable(mut self, resizable: ResizeOrientation) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn is_commenter(&self) -> bool {
        self.kind == NodeKind::Commenter
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    pub fn z_index(&self) -> i32 {
        if self.selected {
            self.base_z_index + 1
        } else {
            self.base_z_index
        }
    }
}

impl NodeGeometry for &NodeState {
    fn id(&self) -> i32 { self.id }
    fn rect(&self) -> Rect { NodeState::rect(self) }
}

/// The shared node collection of one graph.
///
/// Iteration follows insertion order. Mutations made through [`NodeStore`] are
/// journaled as [`NodeEvent`]s until the owner drains them.
#[derive(Default)]
pub struct GraphState {
    nodes: HashMap<i32, NodeState>,
    order: Vec<i32>,
    journal: Vec<NodeEvent>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any node with the same id. Returns the replaced node.
    pub fn insert(&mut self, node: NodeState) -> Option<NodeState> {
        let id = node.id;
        let previous = self.nodes.insert(id, node);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn remove(&mut self, id: i32) -> Option<NodeState> {
        let removed = self.nodes.remove(&id)?;
        self.order.retain(|&n| n != id);
        Some(removed)
    }

    pub fn get(&self, id: i32) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut NodeState> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeState> + '_ {
        self.order.iter().filter_map(move |id| self.nodes.get(id))
    }

    pub fn ids(&self) -> &[i32] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resize a node, keeping its resize bookkeeping in step. Only real changes
    /// are journaled.
    pub fn set_node_size(&mut self, id: i32, size: Size) {
        let Some(node) = self.nodes.get_mut(&id) else { return };
        node.resize.sync(size);
        if node.size != size {
            node.size = size;
            self.journal.push(NodeEvent::SizeChanged { node: id, size });
        }
    }

    pub fn record(&mut self, event: NodeEvent) {
        self.journal.push(event);
    }

    /// Take every event recorded since the last drain.
    pub fn drain_journal(&mut self) -> Vec<NodeEvent> {
        std::mem::take(&mut self.journal)
    }
}

impl NodeStore for GraphState {
    fn node_rect(&self, id: i32) -> Option<Rect> {
        self.get(id).map(NodeState::rect)
    }

    fn is_group(&self, id: i32) -> bool {
        self.get(id).map_or(false, NodeState::is_commenter)
    }

    fn contained_in(&self, group_id: i32, group_rect: &Rect) -> Vec<i32> {
        crate::containment::contained_nodes(group_id, group_rect, self.iter())
    }

    fn set_node_position(&mut self, id: i32, position: Point) {
        let Some(node) = self.nodes.get_mut(&id) else { return };
        if node.position != position {
            node.position = position;
            self.journal.push(NodeEvent::PositionChanged { node: id, position });
        }
    }

    fn adjust_base_z_index(&mut self, id: i32, delta: i32) {
        let Some(node) = self.nodes.get_mut(&id) else { return };
        node.base_z_index += delta;
        let z_index = node.z_index();
        self.journal.push(NodeEvent::ZIndexChanged { node: id, z_index });
    }

    fn membership_changed(&mut self, group: i32, node: i32, member: bool) {
        let event = if member {
            NodeEvent::MemberAdded { group, node }
        } else {
            NodeEvent::MemberRemoved { group, node }
        };
        self.journal.push(event);
    }
}
