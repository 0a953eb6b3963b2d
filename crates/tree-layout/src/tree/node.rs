use kintree_data::PersonRecord;

/// Index of a node inside a [`LayoutTree`]
pub type NodeIndex = usize;

/// What one block of the layout holds: a single person, or a married couple
/// laid out side by side with the primary on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutUnit<'a> {
    Single(&'a PersonRecord),
    Couple {
        primary: &'a PersonRecord,
        spouse: &'a PersonRecord,
    },
}

impl<'a> LayoutUnit<'a> {
    /// The record edges attach to. For a couple this is always the primary,
    /// so a couple has a single point of descent.
    pub fn primary(&self) -> &'a PersonRecord {
        match *self {
            LayoutUnit::Single(record) => record,
            LayoutUnit::Couple { primary, .. } => primary,
        }
    }

    pub fn spouse(&self) -> Option<&'a PersonRecord> {
        match *self {
            LayoutUnit::Single(_) => None,
            LayoutUnit::Couple { spouse, .. } => Some(spouse),
        }
    }

    pub fn is_couple(&self) -> bool {
        matches!(self, LayoutUnit::Couple { .. })
    }
}

/// One block of the tree with its geometry
#[derive(Debug, Clone)]
pub struct LayoutNode<'a> {
    pub unit: LayoutUnit<'a>,

    /// Children ordered left to right
    pub children: Vec<NodeIndex>,

    /// Generation depth, roots are 0
    pub level: usize,

    /// Left edge of the block
    pub x: f32,

    /// Top edge of the block
    pub y: f32,

    /// Width of the block itself (one card, or two cards and a gap)
    pub width: f32,

    /// Width needed by the block and all of its descendants
    pub subtree_width: f32,
}

impl<'a> LayoutNode<'a> {
    pub(crate) fn new(unit: LayoutUnit<'a>, level: usize, width: f32) -> Self {
        Self {
            unit,
            children: Vec::new(),
            level,
            x: 0.0,
            y: 0.0,
            width,
            subtree_width: width,
        }
    }

    pub fn id(&self) -> &'a str {
        self.unit.primary().id.as_str()
    }

    /// Horizontal centre of the block
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Arena holding every node of one layout pass.
///
/// Built by [`FamilyTreeLayout::compute_tree`](crate::FamilyTreeLayout::compute_tree),
/// positioned in place by
/// [`FamilyTreeLayout::compute_positions`](crate::FamilyTreeLayout::compute_positions).
#[derive(Debug, Clone, Default)]
pub struct LayoutTree<'a> {
    pub(crate) nodes: Vec<LayoutNode<'a>>,
    pub(crate) roots: Vec<NodeIndex>,
    /// Roots whose spouse has parents: the same couple is also laid out
    /// under the spouse's parents, one generation lower
    pub(crate) married_in: Vec<NodeIndex>,
}

impl<'a> LayoutTree<'a> {
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    pub fn node(&self, index: NodeIndex) -> &LayoutNode<'a> {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[LayoutNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Roots whose couple is also laid out under the parents of the spouse
    pub fn married_in_roots(&self) -> &[NodeIndex] {
        &self.married_in
    }

    /// Node indices in pre-order: each node before its children, roots and
    /// siblings left to right
    pub fn pre_order(&self) -> Vec<NodeIndex> {
        self.pre_order_from(&self.roots)
    }

    /// Pre-order walk in which married-in roots come after every other root,
    /// so a couple's placement under the spouse's parents is visited first
    pub fn emit_order(&self) -> Vec<NodeIndex> {
        let (married_in, family): (Vec<NodeIndex>, Vec<NodeIndex>) = self
            .roots
            .iter()
            .copied()
            .partition(|root| self.married_in.contains(root));
        self.pre_order_from(&[family, married_in].concat())
    }

    fn pre_order_from(&self, roots: &[NodeIndex]) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeIndex> = roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        order
    }

    /// Find the node whose primary has the given id
    pub fn find(&self, id: &str) -> Option<&LayoutNode<'a>> {
        self.nodes.iter().find(|node| node.id() == id)
    }
}
