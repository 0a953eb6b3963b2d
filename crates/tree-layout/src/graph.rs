use crate::tree::LayoutTree;
use crate::{Metrics, Point, Rect};
use kintree_data::{PersonId, PersonRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Attachment point of an edge on a person card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Marriage line between the two cards of a couple
    Spousal,
    /// Line from a parent (or couple) down to a child
    Descent,
}

/// Where one person card goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePosition {
    pub id: PersonId,
    pub x: f32,
    pub y: f32,
    pub payload: PersonRecord,
    /// True for the primary (left) card of a couple
    pub is_left_spouse: bool,
    /// Raw gender of the partner, for renderers colouring the marriage handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_gender: Option<String>,
}

impl NodePosition {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: PersonId,
    pub target: PersonId,
    pub source_anchor: Anchor,
    pub target_anchor: Anchor,
    pub kind: EdgeKind,
}

impl Edge {
    fn spousal(primary: &PersonId, spouse: &PersonId) -> Self {
        Self {
            id: format!("spouse-{primary}-{spouse}"),
            source: primary.clone(),
            target: spouse.clone(),
            source_anchor: Anchor::Right,
            target_anchor: Anchor::Left,
            kind: EdgeKind::Spousal,
        }
    }

    fn descent(parent: &PersonId, child: &PersonId) -> Self {
        Self {
            id: format!("parent-{parent}-{child}"),
            source: parent.clone(),
            target: child.clone(),
            source_anchor: Anchor::Bottom,
            target_anchor: Anchor::Top,
            kind: EdgeKind::Descent,
        }
    }

    /// Key under which an edge counts as already drawn. A marriage is one
    /// line whichever partner it starts from, and a person has one line of
    /// descent even when their parents' couple is laid out twice.
    fn dedup_key(&self) -> String {
        match self.kind {
            EdgeKind::Spousal => {
                let (a, b) = if self.source <= self.target {
                    (&self.source, &self.target)
                } else {
                    (&self.target, &self.source)
                };
                format!("spouse-{a}-{b}")
            }
            EdgeKind::Descent => format!("descent-{}", self.target),
        }
    }
}

/// The positioned family tree handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyGraph {
    pub positions: Vec<NodePosition>,
    pub edges: Vec<Edge>,
}

impl FamilyGraph {
    pub fn position_of(&self, id: &str) -> Option<&NodePosition> {
        self.positions.iter().find(|p| p.id.as_str() == id)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }

    /// Bounding box of every card, zero sized when the graph is empty
    pub fn bounds(&self, metrics: &Metrics) -> Rect {
        self.positions
            .iter()
            .map(|p| Rect::from_min_size(p.position(), metrics.node_size()))
            .reduce(Rect::union)
            .unwrap_or_default()
    }
}

/// Flatten a positioned tree into cards and edges, in pre-order.
///
/// A person reachable through two paths (someone married into a family while
/// also starting a tree of their own) keeps the card and edges of the first
/// path only. Married-in roots are visited last so that path is the one under
/// the spouse's parents, whatever the order of the records.
pub(crate) fn emit_graph(tree: &LayoutTree<'_>, metrics: &Metrics) -> FamilyGraph {
    let mut graph = FamilyGraph::default();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut added_edges: HashSet<String> = HashSet::new();

    let mut push_edge = |graph: &mut FamilyGraph, edge: Edge| {
        if added_edges.insert(edge.dedup_key()) {
            graph.edges.push(edge);
        }
    };

    for index in tree.emit_order() {
        let node = tree.node(index);
        let primary = node.unit.primary();
        let spouse = node.unit.spouse();

        if placed.insert(primary.id.as_str()) {
            graph.positions.push(NodePosition {
                id: primary.id.clone(),
                x: node.x,
                y: node.y,
                payload: primary.clone(),
                is_left_spouse: spouse.is_some(),
                spouse_gender: spouse.and_then(|s| s.gender.clone()),
            });
        } else {
            debug!("{} is already placed, skipping its second card", primary.id);
        }

        if let Some(spouse) = spouse {
            if placed.insert(spouse.id.as_str()) {
                graph.positions.push(NodePosition {
                    id: spouse.id.clone(),
                    x: node.x + metrics.spouse_offset(),
                    y: node.y,
                    payload: spouse.clone(),
                    is_left_spouse: false,
                    spouse_gender: primary.gender.clone(),
                });
            } else {
                debug!("{} is already placed, skipping its second card", spouse.id);
            }
            push_edge(&mut graph, Edge::spousal(&primary.id, &spouse.id));
        }

        for &child in &node.children {
            let child = tree.node(child).unit.primary();
            push_edge(&mut graph, Edge::descent(&primary.id, &child.id));
        }
    }

    debug!(
        "Emitted {} cards and {} edges",
        graph.positions.len(),
        graph.edges.len()
    );
    graph
}
