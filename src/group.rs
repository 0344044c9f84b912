//! Membership tracking for comment nodes.
//!
//! A [`CommentGroup`] belongs to one comment node and remembers which sibling
//! nodes its rectangle fully contains, together with each member's offset from the
//! comment's position. When the comment is dragged, members follow by re-applying
//! their offsets to the new position.
//!
//! The group never owns nodes. It reads and writes them through [`NodeStore`],
//! which the graph's node collection implements.
//!
//! # Z-order
//!
//! A comment nested inside another comment has its base z-index raised by the
//! configured step when it becomes a member, so it renders above its container.
//! The raise is undone exactly once when it stops being a member, whichever way
//! that happens (moved out, group mode off, container removed).

use std::collections::{BTreeMap, HashSet};

use crate::containment::is_contained;
use crate::geometry::{Point, Rect, Vector};

/// Access to the sibling nodes a [`CommentGroup`] works on.
pub trait NodeStore {
    /// Current rectangle of a node, `None` if unknown.
    fn node_rect(&self, id: i32) -> Option<Rect>;
    /// Whether the node is itself a comment group.
    fn is_group(&self, id: i32) -> bool;
    /// Ids of all nodes fully contained in `group_rect`, excluding `group_id`.
    fn contained_in(&self, group_id: i32, group_rect: &Rect) -> Vec<i32>;
    fn set_node_position(&mut self, id: i32, position: Point);
    fn adjust_base_z_index(&mut self, id: i32, delta: i32);
    /// Called after a node joins (`member == true`) or leaves a group.
    fn membership_changed(&mut self, _group: i32, _node: i32, _member: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Membership {
    /// `member.position - group.position` at the last confirmation.
    pub offset: Vector,
    bumped: bool,
}

impl Membership {
    /// Whether joining raised the member's z-index.
    pub fn raised_z_index(&self) -> bool {
        self.bumped
    }
}

#[derive(Debug, Clone)]
pub struct CommentGroup {
    id: i32,
    group_mode: bool,
    z_step: i32,
    members: BTreeMap<i32, Membership>,
    watched: HashSet<i32>,
}

impl CommentGroup {
    pub fn new(id: i32, group_mode: bool, z_step: i32) -> Self {
        Self {
            id,
            group_mode,
            z_step,
            members: BTreeMap::new(),
            watched: HashSet::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn group_mode(&self) -> bool {
        self.group_mode
    }

    pub fn is_member(&self, node: i32) -> bool {
        self.members.contains_key(&node)
    }

    pub fn offset(&self, node: i32) -> Option<Vector> {
        self.members.get(&node).map(|m| m.offset)
    }

    pub fn membership(&self, node: i32) -> Option<&Membership> {
        self.members.get(&node)
    }

    /// Member ids in ascending order.
    pub fn member_ids(&self) -> Vec<i32> {
        self.members.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Record `node` as a member, refreshing its offset if it already is one.
    ///
    /// Returns `true` only when the node was newly added.
    pub fn update_or_insert<S: NodeStore>(&mut self, store: &mut S, node: i32) -> bool {
        if node == self.id {
            return false;
        }
        let (Some(group_rect), Some(node_rect)) = (store.node_rect(self.id), store.node_rect(node)) else {
            return false;
        };
        let offset = node_rect.position() - group_rect.position();

        if let Some(existing) = self.members.get_mut(&node) {
            existing.offset = offset;
            return false;
        }

        let bumped = store.is_group(node);
        if bumped {
            store.adjust_base_z_index(node, self.z_step);
        }
        self.members.insert(node, Membership { offset, bumped });
        store.membership_changed(self.id, node, true);
        tracing::debug!(group = self.id, node, ?offset, raised = bumped, "node joined comment group");
        true
    }

    /// Drop `node` from the members, undoing its z-index raise. Unknown nodes are
    /// ignored. Returns whether anything was removed.
    pub fn remove<S: NodeStore>(&mut self, store: &mut S, node: i32) -> bool {
        let Some(membership) = self.members.remove(&node) else {
            return false;
        };
        if membership.bumped {
            store.adjust_base_z_index(node, -self.z_step);
        }
        store.membership_changed(self.id, node, false);
        tracing::debug!(group = self.id, node, "node left comment group");
        true
    }

    /// Bring the members in line with current geometry.
    ///
    /// Takes one containment snapshot, removes members no longer contained, then
    /// adds or refreshes every contained node. Does nothing while group mode is off.
    pub fn reconcile<S: NodeStore>(&mut self, store: &mut S) {
        if !self.group_mode {
            return;
        }
        let Some(group_rect) = store.node_rect(self.id) else {
            return;
        };
        let contained = store.contained_in(self.id, &group_rect);
        let current: HashSet<i32> = contained.iter().copied().collect();

        let stale: Vec<i32> = self
            .members
            .keys()
            .filter(|id| !current.contains(id))
            .copied()
            .collect();
        for node in stale {
            self.remove(store, node);
        }
        for node in contained {
            self.update_or_insert(store, node);
        }
    }

    /// Re-evaluate a single sibling after it moved or resized on its own.
    pub fn refresh_member<S: NodeStore>(&mut self, store: &mut S, node: i32) {
        if !self.group_mode || node == self.id {
            return;
        }
        let contained = match (store.node_rect(self.id), store.node_rect(node)) {
            (Some(group_rect), Some(node_rect)) => is_contained(&group_rect, &node_rect),
            _ => false,
        };
        if contained {
            self.update_or_insert(store, node);
        } else {
            self.remove(store, node);
        }
    }

    /// Place every member at its offset from `group_position`.
    pub fn move_members<S: NodeStore>(&self, store: &mut S, group_position: Point) {
        for (&node, membership) in &self.members {
            store.set_node_position(node, membership.offset + group_position);
        }
        tracing::trace!(group = self.id, ?group_position, members = self.members.len(), "moved members");
    }

    /// Switch group mode. Turning it off removes every member (undoing z-index
    /// raises); turning it on rebuilds membership from scratch. Returns whether the
    /// mode changed.
    pub fn set_group_mode<S: NodeStore>(&mut self, store: &mut S, enabled: bool) -> bool {
        if self.group_mode == enabled {
            return false;
        }
        self.group_mode = enabled;
        tracing::debug!(group = self.id, enabled, "group mode changed");
        if enabled {
            self.reconcile(store);
        } else {
            self.untrack_all(store);
        }
        true
    }

    /// Release everything before the owning comment node goes away.
    pub fn detach<S: NodeStore>(&mut self, store: &mut S) {
        self.untrack_all(store);
        self.watched.clear();
    }

    fn untrack_all<S: NodeStore>(&mut self, store: &mut S) {
        for node in self.member_ids() {
            self.remove(store, node);
        }
    }

    /// Start listening for drag completion on a sibling. Returns `false` if the
    /// sibling is this group's own node or was already watched.
    pub fn watch(&mut self, node: i32) -> bool {
        node != self.id && self.watched.insert(node)
    }

    /// Stop listening to a sibling. Returns `false` if it was not watched.
    pub fn unwatch(&mut self, node: i32) -> bool {
        self.watched.remove(&node)
    }

    pub fn is_watching(&self, node: i32) -> bool {
        self.watched.contains(&node)
    }
}
