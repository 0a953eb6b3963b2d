use super::{LayoutTree, NodeIndex};
use crate::Metrics;

enum Frame {
    /// Place a node at the left edge of the span reserved for its subtree
    Place { node: NodeIndex, cursor: f32 },
    /// Move a placed node over the actual centre of its children
    Recenter(NodeIndex),
}

/// Assign coordinates to every node of the tree, roots laid out left to right
/// starting at `start_x`.
///
/// Each block is first centred over the span reserved for its subtree, its
/// children are placed in that span, and the block is then moved over the
/// midpoint between its first and last child. The vertical position only
/// depends on the generation.
pub(crate) fn assign_coordinates(tree: &mut LayoutTree<'_>, metrics: &Metrics, start_x: f32) {
    let mut stack = Vec::with_capacity(tree.nodes.len());

    let mut cursor = start_x;
    let mut root_frames = Vec::with_capacity(tree.roots.len());
    for &root in &tree.roots {
        root_frames.push(Frame::Place { node: root, cursor });
        cursor += tree.nodes[root].subtree_width + metrics.sibling_gap;
    }
    stack.extend(root_frames.into_iter().rev());

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Place { node, cursor } => {
                let current = &mut tree.nodes[node];
                current.x = cursor + current.subtree_width / 2.0 - current.width / 2.0;
                current.y = current.level as f32 * metrics.row_height();

                if current.children.is_empty() {
                    continue;
                }

                let subtree_width = current.subtree_width;
                let current = &tree.nodes[node];
                let children_width = metrics.siblings_width(
                    current
                        .children
                        .iter()
                        .map(|&child| tree.nodes[child].subtree_width),
                );

                // Children narrower than the parent are centred under it
                let mut child_cursor = cursor;
                if children_width < subtree_width {
                    child_cursor += (subtree_width - children_width) / 2.0;
                }

                stack.push(Frame::Recenter(node));
                let mut child_frames = Vec::with_capacity(current.children.len());
                for &child in &current.children {
                    child_frames.push(Frame::Place {
                        node: child,
                        cursor: child_cursor,
                    });
                    child_cursor += tree.nodes[child].subtree_width + metrics.sibling_gap;
                }
                stack.extend(child_frames.into_iter().rev());
            }
            Frame::Recenter(node) => {
                let current = &tree.nodes[node];
                let (Some(&first), Some(&last)) =
                    (current.children.first(), current.children.last())
                else {
                    continue;
                };
                let center =
                    (tree.nodes[first].center_x() + tree.nodes[last].center_x()) / 2.0;
                let width = current.width;
                tree.nodes[node].x = center - width / 2.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_tree;
    use crate::tree::roots::select_roots;
    use crate::tree::RecordIndex;
    use kintree_data::PersonRecord;
    use test_log::test;

    fn layout(records: &[PersonRecord]) -> LayoutTree<'_> {
        let metrics = Metrics::default();
        let index = RecordIndex::new(records);
        let roots = select_roots(&index);
        let mut tree = build_tree(&index, &roots, &metrics);
        assign_coordinates(&mut tree, &metrics, 0.0);
        tree
    }

    #[test]
    fn test_single_person() {
        let records = vec![PersonRecord::new("solo", "Solo")];
        let tree = layout(&records);
        let node = tree.find("solo").unwrap();
        assert_eq!((node.x, node.y), (0.0, 0.0));
    }

    #[test]
    fn test_roots_do_not_overlap() {
        let records = vec![
            PersonRecord::new("a", "A").with_spouse("b"),
            PersonRecord::new("b", "B").with_spouse("a"),
            PersonRecord::new("c", "C"),
        ];
        let tree = layout(&records);
        assert_eq!(tree.find("a").unwrap().x, 0.0);
        // couple (440) + sibling gap (60)
        assert_eq!(tree.find("c").unwrap().x, 500.0);
    }

    #[test]
    fn test_parent_centered_over_children() {
        let records = vec![
            PersonRecord::new("p", "P"),
            PersonRecord::new("c1", "C1").with_parent("p"),
            PersonRecord::new("c2", "C2").with_parent("p"),
            PersonRecord::new("c3", "C3").with_parent("p"),
        ];
        let tree = layout(&records);
        // Children span 3 * 200 + 2 * 60 = 720
        assert_eq!(tree.find("c1").unwrap().x, 0.0);
        assert_eq!(tree.find("c2").unwrap().x, 260.0);
        assert_eq!(tree.find("c3").unwrap().x, 520.0);
        assert_eq!(tree.find("c3").unwrap().y, 200.0);
        let parent = tree.find("p").unwrap();
        assert_eq!(parent.center_x(), 360.0);
        assert_eq!(parent.y, 0.0);
    }

    #[test]
    fn test_single_child_under_couple_is_centered() {
        let records = vec![
            PersonRecord::new("a", "A").with_spouse("b"),
            PersonRecord::new("b", "B").with_spouse("a"),
            PersonRecord::new("c", "C").with_parent("a"),
        ];
        let tree = layout(&records);
        let couple = tree.find("a").unwrap();
        let child = tree.find("c").unwrap();
        assert_eq!(couple.x, 0.0);
        assert_eq!(child.x, 120.0);
        assert_eq!(child.center_x(), couple.center_x());
    }

    #[test]
    fn test_recenter_over_asymmetric_children() {
        // "c1" has a wide subtree, "c2" is a leaf: the parent moves over the
        // midpoint of the two child blocks, not over the middle of its span
        let records = vec![
            PersonRecord::new("p", "P"),
            PersonRecord::new("c1", "C1").with_parent("p"),
            PersonRecord::new("c2", "C2").with_parent("p"),
            PersonRecord::new("g1", "G1").with_parent("c1"),
            PersonRecord::new("g2", "G2").with_parent("c1"),
            PersonRecord::new("g3", "G3").with_parent("c1"),
        ];
        let tree = layout(&records);
        let c1 = tree.find("c1").unwrap();
        let c2 = tree.find("c2").unwrap();
        let p = tree.find("p").unwrap();
        // c1 subtree is 720 wide, c1 sits over its middle
        assert_eq!(c1.center_x(), 360.0);
        assert_eq!(c2.x, 780.0);
        assert_eq!(p.center_x(), (360.0 + 880.0) / 2.0);
        assert_eq!(tree.find("g1").unwrap().y, 400.0);
    }
}
