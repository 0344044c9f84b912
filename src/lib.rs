//! # Node Group Editor
//!
//! Comment-group containment and resize geometry for Slint node editors.
//!
//! A *comment* node is a resizable box that groups the nodes it fully contains:
//! drag the comment and its members follow. Nested comments are stacked above
//! their container. Every node can be resized from up to eight handles with a
//! size floor that keeps it from shrinking below its first rendered size.
//!
//! ## Features
//!
//! - **Containment tracking** - Membership re-derived from geometry on every layout change
//! - **Offset-based moves** - Members keep their position relative to the comment
//! - **Nested z-order** - Contained comments are raised, and lowered again exactly once
//! - **Eight-handle resizing** - Top/left handles move the node so the far edge stays put
//! - **Callback-based wiring** - Closures shaped for Slint callbacks, plus model sync helpers
//!
//! ## Quick Start
//!
//! ```
//! use node_group_editor::{NodeGraph, NodeState, Point, Size};
//!
//! let mut graph = NodeGraph::new();
//! graph.add_node(NodeState::commenter(1, Point::new(0.0, 0.0), Size::new(200.0, 200.0)));
//! graph.add_node(NodeState::node(2, Point::new(10.0, 10.0), Size::new(50.0, 50.0)));
//! assert_eq!(graph.members(1), vec![2]);
//!
//! graph.set_position(1, Point::new(100.0, 100.0));
//! assert_eq!(graph.node(2).unwrap().position, Point::new(110.0, 110.0));
//! ```
//!
//! ## Core Types
//!
//! - [`NodeGraph`] - Node collection with grouping, drags, selection and events
//! - [`CommentGroup`] - Membership tracker of one comment node
//! - [`ResizeState`] / [`resize_for_thumb`] - Resize geometry
//! - [`NodeEditorController`] - Shared handle producing Slint callbacks
//! - [`EditorConfig`] - Tunables, loadable from JSON

pub mod geometry;
pub mod containment;
pub mod resize;
pub mod group;
pub mod state;
pub mod placement;
pub mod selection;
pub mod events;
pub mod graph;
pub mod controller;
pub mod config;
pub mod error;

pub use geometry::{Point, Rect, Size, Vector};
pub use containment::{bounding_rect, contained_nodes, is_contained, NodeGeometry, SimpleNodeGeometry};
pub use resize::{
    apply_resize, clamp_drag_delta, resize_for_thumb, DragSession, ResizeOrientation, ResizeOutcome,
    ResizeState, ThumbPosition,
};
pub use group::{CommentGroup, Membership, NodeStore};
pub use state::{GraphState, NodeKind, NodeState};
pub use placement::{InitialPlacement, PlacementInsets};
pub use selection::{SelectionChange, SelectionManager};
pub use events::{EventHub, NodeEvent, SubscriptionId};
pub use graph::{MovableNode, NodeGraph};
pub use controller::NodeEditorController;
pub use config::EditorConfig;
pub use error::ConfigError;
