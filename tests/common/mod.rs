//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use node_group_editor::{NodeEvent, NodeGraph};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every event a graph publishes.
#[derive(Default, Clone)]
pub struct EventTracker {
    pub events: Rc<RefCell<Vec<NodeEvent>>>,
}

impl EventTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a fresh tracker to `graph`.
    pub fn attach(graph: &mut NodeGraph) -> Self {
        let tracker = Self::new();
        let sink = tracker.events.clone();
        graph.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        tracker
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn snapshot(&self) -> Vec<NodeEvent> {
        self.events.borrow().clone()
    }

    /// (group, node) pairs of every MemberAdded event.
    pub fn joined(&self) -> Vec<(i32, i32)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match *e {
                NodeEvent::MemberAdded { group, node } => Some((group, node)),
                _ => None,
            })
            .collect()
    }

    /// (group, node) pairs of every MemberRemoved event.
    pub fn left(&self) -> Vec<(i32, i32)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match *e {
                NodeEvent::MemberRemoved { group, node } => Some((group, node)),
                _ => None,
            })
            .collect()
    }

    /// Z-index values reported for `node`, in order.
    pub fn z_changes(&self, node: i32) -> Vec<i32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match *e {
                NodeEvent::ZIndexChanged { node: n, z_index } if n == node => Some(z_index),
                _ => None,
            })
            .collect()
    }
}
