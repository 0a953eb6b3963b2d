mod builder;
mod index;
mod node;
mod positions;
mod roots;

pub use index::RecordIndex;
pub use node::{LayoutNode, LayoutTree, LayoutUnit, NodeIndex};

use crate::graph::emit_graph;
use crate::{FamilyGraph, LayoutEngine, Metrics};
use kintree_data::PersonRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use builder::build_tree;
use positions::assign_coordinates;
use roots::select_roots;

/// Errors that can occur during family tree layout
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A metric is unusable (NaN, infinite, negative, or a zero sized card)
    #[error("invalid layout metric {name}: {value}")]
    InvalidMetric { name: &'static str, value: f32 },
}

/// Configuration for the family tree layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyTreeLayout {
    /// Card sizes and gaps
    pub metrics: Metrics,
}

impl FamilyTreeLayout {
    /// Create a new family tree layout with the given metrics
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }

    /// Build the tree of layout blocks (roots, couples, children, widths)
    ///
    /// The returned tree borrows the records of the index. Nodes are not
    /// positioned yet.
    pub fn compute_tree<'a>(&self, index: &RecordIndex<'a>) -> LayoutTree<'a> {
        let roots = select_roots(index);
        debug!("Selected {} roots out of {} records", roots.len(), index.len());
        build_tree(index, &roots, &self.metrics)
    }

    /// Assign coordinates to every node of the tree
    pub fn compute_positions(&self, tree: &mut LayoutTree<'_>) {
        assign_coordinates(tree, &self.metrics, 0.0);
    }

    /// Flatten a positioned tree into cards and edges
    pub fn emit_graph(&self, tree: &LayoutTree<'_>) -> FamilyGraph {
        emit_graph(tree, &self.metrics)
    }
}

impl<'r> LayoutEngine<&'r [PersonRecord]> for FamilyTreeLayout {
    type Error = LayoutError;

    fn layout(&self, records: &'r [PersonRecord]) -> Result<FamilyGraph, Self::Error> {
        self.metrics.validate()?;
        let index = RecordIndex::new(records);
        let mut tree = self.compute_tree(&index);
        self.compute_positions(&mut tree);
        Ok(self.emit_graph(&tree))
    }
}
