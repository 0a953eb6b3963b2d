use super::roots::is_secondary_spouse;
use super::{LayoutNode, LayoutTree, LayoutUnit, NodeIndex, RecordIndex};
use crate::Metrics;
use kintree_data::PersonRecord;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Work items of the depth first walk. `Enter` creates a node and schedules
/// its children, `Exit` runs once all of them are done.
enum Frame<'a> {
    Enter {
        record: &'a PersonRecord,
        level: usize,
        parent: Option<NodeIndex>,
    },
    Exit(NodeIndex),
}

/// Build the layout tree under each root and compute every width.
///
/// Widths are filled in on the way back up (`Exit`), so the tree is walked
/// once. The walk uses its own stack: a deep family tree can't overflow the
/// thread's stack.
pub(crate) fn build_tree<'a>(
    index: &RecordIndex<'a>,
    roots: &[&'a PersonRecord],
    metrics: &Metrics,
) -> LayoutTree<'a> {
    let mut tree = LayoutTree::default();
    // Ids of the ancestors of the node being built, including spouses. With
    // well formed data nobody can be their own ancestor, this only keeps a
    // parent cycle from looping forever.
    let mut on_path: HashSet<&str> = HashSet::new();

    let mut stack: Vec<Frame<'a>> = roots
        .iter()
        .rev()
        .map(|&record| Frame::Enter {
            record,
            level: 0,
            parent: None,
        })
        .collect();

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter {
                record,
                level,
                parent,
            } => {
                if on_path.contains(record.id.as_str()) {
                    warn!("{} is its own ancestor, skipping it", record.id);
                    continue;
                }

                let spouse = index.spouse_of(record).filter(|spouse| {
                    let cyclic = on_path.contains(spouse.id.as_str());
                    if cyclic {
                        warn!("Spouse {} of {} is also an ancestor", spouse.id, record.id);
                    }
                    !cyclic
                });

                let (unit, width) = match spouse {
                    Some(spouse) => (
                        LayoutUnit::Couple {
                            primary: record,
                            spouse,
                        },
                        metrics.couple_width(),
                    ),
                    None => (LayoutUnit::Single(record), metrics.node_width),
                };

                let node_index = tree.nodes.len();
                tree.nodes.push(LayoutNode::new(unit, level, width));
                match parent {
                    Some(parent) => tree.nodes[parent].children.push(node_index),
                    None => {
                        tree.roots.push(node_index);
                        if spouse.is_some_and(|spouse| index.has_parent(spouse)) {
                            debug!("{} married into another family", record.id);
                            tree.married_in.push(node_index);
                        }
                    }
                }

                on_path.insert(record.id.as_str());
                if let Some(spouse) = spouse {
                    on_path.insert(spouse.id.as_str());
                }

                stack.push(Frame::Exit(node_index));
                let children = collect_children(index, record, spouse);
                stack.extend(children.into_iter().rev().map(|child| Frame::Enter {
                    record: child,
                    level: level + 1,
                    parent: Some(node_index),
                }));
            }
            Frame::Exit(node_index) => {
                let node = &tree.nodes[node_index];
                on_path.remove(node.unit.primary().id.as_str());
                if let Some(spouse) = node.unit.spouse() {
                    on_path.remove(spouse.id.as_str());
                }

                if !node.children.is_empty() {
                    let children_width = metrics.siblings_width(
                        node.children
                            .iter()
                            .map(|&child| tree.nodes[child].subtree_width),
                    );
                    let subtree_width = node.width.max(children_width);
                    tree.nodes[node_index].subtree_width = subtree_width;
                }
            }
        }
    }

    debug!(
        "Built {} layout nodes under {} roots",
        tree.nodes.len(),
        tree.roots.len()
    );
    tree
}

/// Children of a person and of their spouse, deduplicated, minus the
/// secondary half of any couple formed by two of them (it comes along with
/// its primary), sorted eldest first.
fn collect_children<'a>(
    index: &RecordIndex<'a>,
    primary: &'a PersonRecord,
    spouse: Option<&'a PersonRecord>,
) -> Vec<&'a PersonRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut children: Vec<&'a PersonRecord> = Vec::new();

    for parent in std::iter::once(primary).chain(spouse) {
        for &child in index.children_of(parent.id.as_str()) {
            if seen.insert(child.id.as_str()) {
                children.push(child);
            }
        }
    }

    children.retain(|&child| match index.spouse_of(child) {
        Some(partner) => {
            !(seen.contains(partner.id.as_str()) && is_secondary_spouse(child, partner))
        }
        None => true,
    });

    children.sort_by(|a, b| sibling_order(a, b));
    children
}

/// Left to right order of siblings: known birth dates first, eldest first,
/// then by id. Ids are unique so this is a total order.
pub(crate) fn sibling_order(a: &PersonRecord, b: &PersonRecord) -> Ordering {
    match (a.birth_date, b.birth_date) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}
