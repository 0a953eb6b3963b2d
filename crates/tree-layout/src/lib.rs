//! Genealogical tree layout
//!
//! Turns a flat, unordered list of person records, linked through their
//! `parent_id` and `spouse_id`, into cards and edges positioned for drawing.
//! Married people are laid out as one block, children are centred under
//! their parents and every generation sits on its own row.
//!
//! The layout is a pure function of the records: it keeps no state between
//! calls and never fails on dangling or one-sided references, which are
//! treated as absent.
//!
//! # Example
//!
//! ```
//! use kintree_data::PersonRecord;
//! use kintree_layout::{EdgeKind, FamilyTreeLayout, LayoutEngine, RecordIndex};
//!
//! let records = vec![
//!     PersonRecord::new("a", "Ann").with_spouse("b"),
//!     PersonRecord::new("b", "Bob").with_spouse("a"),
//!     PersonRecord::new("c", "Cid").with_parent("b"),
//! ];
//!
//! // Use the LayoutEngine trait (simple, single-phase):
//! let engine = FamilyTreeLayout::default();
//! let graph = engine.layout(&records[..]).unwrap();
//! assert_eq!(graph.positions.len(), 3);
//! assert_eq!(graph.edges_of_kind(EdgeKind::Spousal).count(), 1);
//!
//! // Or directly by calling each step for better control
//! let index = RecordIndex::new(&records);
//! let mut tree = engine.compute_tree(&index);
//! engine.compute_positions(&mut tree);
//! let graph = engine.emit_graph(&tree);
//! assert_eq!(graph.edges.len(), 2);
//! ```

mod engine;
mod geometry;
mod graph;
mod metrics;

pub mod tree;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Rect, Size};
pub use graph::{Anchor, Edge, EdgeKind, FamilyGraph, NodePosition};
pub use metrics::Metrics;

// Re-export tree layout types
pub use tree::{FamilyTreeLayout, LayoutError, LayoutTree, LayoutUnit, RecordIndex};

use kintree_data::PersonRecord;

/// Lay out records with the default metrics
pub fn layout_family(records: &[PersonRecord]) -> FamilyGraph {
    let engine = FamilyTreeLayout::default();
    let index = RecordIndex::new(records);
    let mut tree = engine.compute_tree(&index);
    engine.compute_positions(&mut tree);
    engine.emit_graph(&tree)
}
