//! Change notifications for the view layer.
//!
//! The graph publishes a [`NodeEvent`] for every observable change it makes. A view
//! subscribes with a closure and gets a [`SubscriptionId`] back to unsubscribe with.
//! Handlers run synchronously inside the call that produced the event, so they must
//! not call back into the graph.

use crate::geometry::{Point, Size, Vector};
use crate::resize::ThumbPosition;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeEvent {
    DragPositionStarted { node: i32, thumb: ThumbPosition },
    DragPositionDelta { node: i32, thumb: ThumbPosition, delta: Vector },
    DragPositionCompleted { node: i32, thumb: ThumbPosition },
    DragSizeStarted { node: i32, thumb: ThumbPosition, size: Size },
    DragSizeDelta { node: i32, thumb: ThumbPosition, size: Size },
    DragSizeCompleted { node: i32, thumb: ThumbPosition, size: Size },
    /// A node was moved, either directly or by following its comment group.
    PositionChanged { node: i32, position: Point },
    /// A node's size changed, from a resize drag or a direct update.
    SizeChanged { node: i32, size: Size },
    MemberAdded { group: i32, node: i32 },
    MemberRemoved { group: i32, node: i32 },
    ZIndexChanged { node: i32, z_index: i32 },
    NameEditStarted { node: i32 },
    NameEditFinished { node: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered list of subscriber callbacks.
pub struct EventHub<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> Default for EventHub<E> {
    fn default() -> Self {
        Self { next_id: 0, handlers: Vec::new() }
    }
}

impl<E> EventHub<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers are called in subscription order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub, _)| *sub != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
