use std::collections::{BTreeMap, HashMap};

use slint::{Model, VecModel};

use crate::config::EditorConfig;
use crate::containment::bounding_rect;
use crate::events::{EventHub, NodeEvent, SubscriptionId};
use crate::geometry::{Point, Size, Vector};
use crate::group::{CommentGroup, NodeStore};
use crate::placement::InitialPlacement;
use crate::resize::{DragSession, ThumbPosition};
use crate::selection::{SelectionChange, SelectionManager};
use crate::state::{GraphState, NodeState};

/// Trait for application node types that mirror editor positions.
///
/// Implement it on the row type of your Slint node model to use
/// [`NodeGraph::sync_positions_to_model`].
///
/// # Example
///
/// ```ignore
/// impl MovableNode for NodeData {
///     fn id(&self) -> i32 { self.id }
///     fn x(&self) -> f32 { self.x }
///     fn y(&self) -> f32 { self.y }
///     fn set_x(&mut self, x: f32) { self.x = x }
///     fn set_y(&mut self, y: f32) { self.y = y }
/// }
/// ```
pub trait MovableNode: Clone + 'static {
    fn id(&self) -> i32;
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
    /// Rows that carry a size get it updated too (default: ignored).
    fn set_size(&mut self, _width: f32, _height: f32) {}
    fn size(&self) -> Option<(f32, f32)> {
        None
    }
    /// Rows that carry a z-index get it updated too (default: ignored).
    fn set_z_index(&mut self, _z_index: i32) {}
    fn z_index(&self) -> Option<i32> {
        None
    }
}

/// The node collection of one editor, with comment grouping and drag handling.
///
/// All mutations run synchronously. Every call that changes state publishes the
/// resulting [`NodeEvent`]s to subscribers before it returns.
pub struct NodeGraph {
    config: EditorConfig,
    state: GraphState,
    groups: BTreeMap<i32, CommentGroup>,
    selection: SelectionManager,
    drags: HashMap<i32, DragSession>,
    events: EventHub<NodeEvent>,
    next_id: i32,
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            state: GraphState::new(),
            groups: BTreeMap::new(),
            selection: SelectionManager::new(),
            drags: HashMap::new(),
            events: EventHub::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn node(&self, id: i32) -> Option<&NodeState> {
        self.state.get(id)
    }

    pub fn group(&self, id: i32) -> Option<&CommentGroup> {
        self.groups.get(&id)
    }

    /// An id not used by any node added so far.
    pub fn next_node_id(&self) -> i32 {
        self.next_id
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&NodeEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Collection changes ===

    /// Add a node and let every comment group see it.
    ///
    /// The node's base z-index is taken from the config for its kind. Adding an id
    /// that already exists replaces the old node.
    pub fn add_node(&mut self, mut node: NodeState) -> i32 {
        let id = node.id;
        if self.state.contains(id) {
            self.remove_node(id);
        }

        node.base_z_index = if node.is_commenter() {
            self.config.commenter_z_index
        } else {
            self.config.node_z_index
        };
        if node.is_commenter() && node.name.is_empty() {
            node.name = self.config.default_comment_name.as_str().into();
        }
        let is_commenter = node.is_commenter();
        self.state.insert(node);
        self.next_id = self.next_id.max(id.saturating_add(1));
        tracing::debug!(node = id, commenter = is_commenter, "node added");

        for group in self.groups.values_mut() {
            if group.watch(id) {
                group.refresh_member(&mut self.state, id);
            }
        }

        if is_commenter {
            let mut group = CommentGroup::new(id, self.config.group_mode_default, self.config.nested_group_z_step);
            for &sibling in self.state.ids() {
                group.watch(sibling);
            }
            group.reconcile(&mut self.state);
            self.groups.insert(id, group);
        }

        self.flush();
        id
    }

    /// Remove a node. Groups stop watching it and drop it from their members; if
    /// it was a comment, its own members are released first.
    pub fn remove_node(&mut self, id: i32) -> Option<NodeState> {
        if !self.state.contains(id) {
            return None;
        }
        self.drags.remove(&id);

        if let Some(mut group) = self.groups.remove(&id) {
            group.detach(&mut self.state);
        }
        for group in self.groups.values_mut() {
            if group.unwatch(id) {
                group.remove(&mut self.state, id);
            }
        }
        self.selection.forget(id);

        let removed = self.state.remove(id);
        tracing::debug!(node = id, "node removed");
        self.flush();
        removed
    }

    // === Geometry changes ===

    /// Move a node and re-evaluate which comments contain it.
    ///
    /// A comment in group mode first drops members that no longer fit where it
    /// stands, then carries the rest along and re-derives membership at the new
    /// place. The members it carried are re-evaluated by the other comments.
    pub fn set_position(&mut self, id: i32, position: Point) -> bool {
        if !self.state.contains(id) {
            return false;
        }
        if let Some(group) = self.groups.get_mut(&id) {
            group.reconcile(&mut self.state);
        }
        self.state.set_node_position(id, position);

        let carried = self.carry_members(id, position);
        self.refresh_in_groups(id);
        for member in carried {
            self.refresh_in_groups(member);
        }
        self.flush();
        true
    }

    /// Resize a node and re-evaluate which comments contain it. A comment also
    /// re-derives its own members.
    pub fn set_size(&mut self, id: i32, size: Size) -> bool {
        if !self.state.contains(id) {
            return false;
        }
        self.state.set_node_size(id, size);
        if let Some(group) = self.groups.get_mut(&id) {
            group.reconcile(&mut self.state);
        }
        self.refresh_in_groups(id);
        self.flush();
        true
    }

    /// Move a comment's members to their offsets from `position` and re-derive
    /// membership. Returns the members afterwards; empty outside group mode.
    fn carry_members(&mut self, id: i32, position: Point) -> Vec<i32> {
        match self.groups.get_mut(&id) {
            Some(group) if group.group_mode() => {
                group.move_members(&mut self.state, position);
                group.reconcile(&mut self.state);
                group.member_ids()
            }
            _ => Vec::new(),
        }
    }

    // === Drag sessions ===

    /// Start dragging a node body (`ThumbPosition::None`) or one of its resize
    /// handles. Handles the node's orientation does not allow are refused.
    pub fn begin_drag(&mut self, id: i32, thumb: ThumbPosition) -> bool {
        let Some(node) = self.state.get_mut(id) else {
            return false;
        };
        if !node.resizable.allows(thumb) {
            tracing::debug!(node = id, ?thumb, "resize handle not allowed");
            return false;
        }

        let session = if thumb.is_body() {
            self.state.record(NodeEvent::DragPositionStarted { node: id, thumb });
            DragSession::new(thumb)
        } else {
            node.resize.begin(node.size);
            let size = node.size;
            if thumb.moves_position() {
                self.state.record(NodeEvent::DragPositionStarted { node: id, thumb });
            }
            self.state.record(NodeEvent::DragSizeStarted { node: id, thumb, size });
            DragSession::new(thumb)
        };
        self.drags.insert(id, session);

        if let Some(group) = self.groups.get_mut(&id) {
            group.reconcile(&mut self.state);
        }
        self.flush();
        true
    }

    /// Feed one drag delta. Returns the node's new position and size, or `None`
    /// when no drag is active on the node.
    pub fn drag_delta(&mut self, id: i32, delta: Vector) -> Option<(Point, Size)> {
        let session = self.drags.get_mut(&id)?;
        session.record(delta);
        let thumb = session.thumb;
        let node = self.state.get_mut(id)?;

        if thumb.is_body() {
            let position = node.position + delta;
            self.state.set_node_position(id, position);
            self.state.record(NodeEvent::DragPositionDelta { node: id, thumb, delta });
            if let Some(group) = self.groups.get_mut(&id) {
                if group.group_mode() {
                    group.move_members(&mut self.state, position);
                    group.reconcile(&mut self.state);
                }
            }
        } else {
            let outcome = node.resize.apply(thumb, delta);
            let position = node.position + outcome.position_delta;
            self.state.set_node_size(id, outcome.min_size);
            self.state.set_node_position(id, position);
            if thumb.moves_position() {
                self.state.record(NodeEvent::DragPositionDelta {
                    node: id,
                    thumb,
                    delta: outcome.position_delta,
                });
            }
            self.state.record(NodeEvent::DragSizeDelta { node: id, thumb, size: outcome.min_size });
            if let Some(group) = self.groups.get_mut(&id) {
                group.reconcile(&mut self.state);
            }
        }

        let rect = self.state.get(id)?.rect();
        self.flush();
        Some((rect.position(), rect.size()))
    }

    /// Finish a drag. Groups watching the node re-evaluate it; a dragged comment
    /// re-derives its members, settles them at their offsets and has the other
    /// comments re-evaluate the members it carried.
    pub fn end_drag(&mut self, id: i32) -> Option<DragSession> {
        let session = self.drags.remove(&id)?;
        let thumb = session.thumb;
        let node = self.state.get(id)?;
        let position = node.position;
        let size = node.size;

        if thumb.is_body() || thumb.moves_position() {
            self.state.record(NodeEvent::DragPositionCompleted { node: id, thumb });
        }
        if !thumb.is_body() {
            self.state.record(NodeEvent::DragSizeCompleted { node: id, thumb, size });
        }

        let carried = match self.groups.get_mut(&id) {
            Some(group) => {
                group.reconcile(&mut self.state);
                if group.group_mode() {
                    group.move_members(&mut self.state, position);
                    group.member_ids()
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        };
        self.refresh_in_groups(id);
        for member in carried {
            self.refresh_in_groups(member);
        }
        self.flush();
        Some(session)
    }

    pub fn drag_session(&self, id: i32) -> Option<&DragSession> {
        self.drags.get(&id)
    }

    // === Grouping ===

    /// Turn group mode on or off for a comment. Returns whether it changed.
    pub fn set_group_mode(&mut self, group_id: i32, enabled: bool) -> bool {
        let Some(group) = self.groups.get_mut(&group_id) else {
            return false;
        };
        let changed = group.set_group_mode(&mut self.state, enabled);
        self.flush();
        changed
    }

    /// Members of a comment in ascending id order (empty for unknown ids).
    pub fn members(&self, group_id: i32) -> Vec<i32> {
        self.groups.get(&group_id).map(CommentGroup::member_ids).unwrap_or_default()
    }

    pub fn is_member(&self, group_id: i32, node_id: i32) -> bool {
        self.groups.get(&group_id).map_or(false, |g| g.is_member(node_id))
    }

    pub fn member_offset(&self, group_id: i32, node_id: i32) -> Option<Vector> {
        self.groups.get(&group_id)?.offset(node_id)
    }

    /// Comments currently holding `node_id` as a member.
    pub fn groups_containing(&self, node_id: i32) -> Vec<i32> {
        self.groups
            .values()
            .filter(|g| g.is_member(node_id))
            .map(CommentGroup::id)
            .collect()
    }

    fn refresh_in_groups(&mut self, id: i32) {
        for group in self.groups.values_mut() {
            if group.is_watching(id) {
                group.refresh_member(&mut self.state, id);
            }
        }
    }

    // === Placement and naming ===

    /// Apply the node's pending placement request, if any. The request is
    /// consumed; later calls return `false`.
    pub fn realize_node(&mut self, id: i32) -> bool {
        let insets = self.config.comment_insets;
        let default_width = self.config.comment_default_width;
        let Some(node) = self.state.get_mut(id) else {
            return false;
        };
        let Some(request) = node.pending_placement.take() else {
            return false;
        };
        tracing::debug!(node = id, ?request, "consuming placement request");

        let (position, size) = request.resolve(&insets);
        let size = match size {
            Some(size) => size,
            None if node.is_commenter() => Size::new(default_width, node.size.height),
            None => node.size,
        };
        self.state.set_node_size(id, size);
        self.state.set_node_position(id, position);

        if let Some(group) = self.groups.get_mut(&id) {
            group.reconcile(&mut self.state);
        }
        self.refresh_in_groups(id);
        if request.name_editing {
            self.begin_name_edit(id);
        }
        self.flush();
        true
    }

    /// Enter name-edit mode. Returns `false` if the node is unknown or already
    /// being edited.
    pub fn begin_name_edit(&mut self, id: i32) -> bool {
        let Some(node) = self.state.get_mut(id) else {
            return false;
        };
        if node.editing_name {
            return false;
        }
        node.editing_name = true;
        self.state.record(NodeEvent::NameEditStarted { node: id });
        self.flush();
        true
    }

    /// Leave name-edit mode, committing `name` when given.
    pub fn finish_name_edit(&mut self, id: i32, name: Option<&str>) -> bool {
        let Some(node) = self.state.get_mut(id) else {
            return false;
        };
        if !node.editing_name {
            return false;
        }
        node.editing_name = false;
        if let Some(name) = name {
            node.name = name.into();
        }
        self.state.record(NodeEvent::NameEditFinished { node: id });
        self.flush();
        true
    }

    /// Create a comment around the given nodes, with name editing on.
    ///
    /// Unknown ids are skipped; returns `None` if none of the ids exist.
    pub fn surround_with_comment(&mut self, ids: &[i32]) -> Option<i32> {
        let content = bounding_rect(ids.iter().filter_map(|&id| self.state.get(id)))?;
        let id = self.next_id;
        let comment = NodeState::commenter(id, content.position(), content.size())
            .with_placement(InitialPlacement::surrounding(content));
        self.add_node(comment);
        self.realize_node(id);
        Some(id)
    }

    /// [`surround_with_comment`](Self::surround_with_comment) for the current selection.
    pub fn surround_selection(&mut self) -> Option<i32> {
        let ids = self.selection.selected_ids();
        self.surround_with_comment(&ids)
    }

    // === Selection ===

    pub fn select(&mut self, id: i32, shift_held: bool) {
        if !self.state.contains(id) {
            return;
        }
        let change = self.selection.handle_interaction(id, shift_held);
        self.apply_selection(change);
    }

    pub fn replace_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let known: Vec<i32> = ids.into_iter().filter(|&id| self.state.contains(id)).collect();
        let change = self.selection.replace_selection(known);
        self.apply_selection(change);
    }

    pub fn clear_selection(&mut self) {
        let change = self.selection.clear();
        self.apply_selection(change);
    }

    pub fn selected_ids(&self) -> Vec<i32> {
        self.selection.selected_ids()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    fn apply_selection(&mut self, change: SelectionChange) {
        let flips = change
            .selected
            .iter()
            .map(|&id| (id, true))
            .chain(change.deselected.iter().map(|&id| (id, false)));
        for (id, selected) in flips {
            if let Some(node) = self.state.get_mut(id) {
                node.selected = selected;
                let z_index = node.z_index();
                self.state.record(NodeEvent::ZIndexChanged { node: id, z_index });
            }
        }
        self.flush();
    }

    pub fn z_index(&self, id: i32) -> Option<i32> {
        self.state.get(id).map(NodeState::z_index)
    }

    /// Mirror the selected ids into a Slint model.
    pub fn sync_selection_to_model(&self, model: &VecModel<i32>) {
        self.selection.sync_to_model(model);
    }

    /// Take the selection from a Slint model, e.g. after a box selection in the
    /// UI. Unknown ids are skipped.
    pub fn sync_selection_from_model(&mut self, model: &dyn Model<Data = i32>) {
        let ids: Vec<i32> = (0..model.row_count()).filter_map(|i| model.row_data(i)).collect();
        self.replace_selection(ids);
    }

    // === Slint model sync ===

    /// Copy positions (and sizes / z-indices where the row supports them) into a
    /// Slint model. Rows for unknown ids are left alone; unchanged rows are not
    /// rewritten.
    pub fn sync_positions_to_model<T>(&self, model: &VecModel<T>)
    where
        T: MovableNode,
    {
        for i in 0..model.row_count() {
            let Some(mut row) = model.row_data(i) else { continue };
            let Some(node) = self.state.get(MovableNode::id(&row)) else { continue };

            let mut dirty = false;
            if row.x() != node.position.x || row.y() != node.position.y {
                row.set_x(node.position.x);
                row.set_y(node.position.y);
                dirty = true;
            }
            if let Some((w, h)) = row.size() {
                if w != node.size.width || h != node.size.height {
                    row.set_size(node.size.width, node.size.height);
                    dirty = true;
                }
            }
            if let Some(z) = row.z_index() {
                if z != node.z_index() {
                    row.set_z_index(node.z_index());
                    dirty = true;
                }
            }
            if dirty {
                model.set_row_data(i, row);
            }
        }
    }

    /// Mirror a comment's member ids into a Slint model.
    pub fn sync_members_to_model(&self, group_id: i32, model: &VecModel<i32>) {
        model.set_vec(self.members(group_id));
    }

    fn flush(&mut self) {
        for event in self.state.drain_journal() {
            self.events.emit(&event);
        }
    }
}
