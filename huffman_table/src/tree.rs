//! Huffman tree stored in an arena of nodes.

use dyn_size_of::GetSize;
use tracing::trace;

/// Identifier (index in the arena) of a node of [`HuffmanTree`].
///
/// Leaves get identifiers in ascending order of their symbols, internal nodes follow in the order of creation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the index of the node in the arena.
    #[inline(always)] pub fn index(self) -> usize { self.0 as usize }
}

/// Traversal state of a node, used by the code generator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// The left subtree has not been fully explored yet (white).
    Unvisited,
    /// The left subtree has been explored, the right one has not (gray).
    LeftDone,
    /// Both subtrees (or, for a leaf, the leaf itself) have been explored (black).
    Done
}

impl Color {
    /// Returns the color that follows `self` after one of the subtrees gets fully explored.
    #[inline] pub fn promoted(self) -> Self {
        match self {
            Color::Unvisited => Color::LeftDone,
            Color::LeftDone | Color::Done => Color::Done
        }
    }
}

/// Node of the Huffman tree.
///
/// A node is a leaf iff it has no children iff it has a symbol.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) weight: u64,
    pub(crate) symbol: Option<u8>,
    pub(crate) children: Option<[NodeId; 2]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) color: Color
}

impl GetSize for Node {}

impl Node {
    /// Constructs a leaf for `symbol` that occurs `weight` times.
    pub(crate) fn leaf(symbol: u8, weight: u64) -> Self {
        Self { weight, symbol: Some(symbol), children: None, parent: None, color: Color::Done }
    }

    /// Constructs an internal node with given children.
    pub(crate) fn internal(weight: u64, left: NodeId, right: NodeId) -> Self {
        Self { weight, symbol: None, children: Some([left, right]), parent: None, color: Color::Unvisited }
    }

    /// Returns the number of occurrences of the symbol (leaf) or the sum of the children's weights.
    #[inline] pub fn weight(&self) -> u64 { self.weight }

    /// Returns the symbol of a leaf or `None` for an internal node.
    #[inline] pub fn symbol(&self) -> Option<u8> { self.symbol }

    /// Returns the left child or `None` for a leaf.
    #[inline] pub fn left(&self) -> Option<NodeId> { self.children.map(|c| c[0]) }

    /// Returns the right child or `None` for a leaf.
    #[inline] pub fn right(&self) -> Option<NodeId> { self.children.map(|c| c[1]) }

    /// Returns the parent or `None` for the root.
    #[inline] pub fn parent(&self) -> Option<NodeId> { self.parent }

    /// Returns the current traversal color.
    #[inline] pub fn color(&self) -> Color { self.color }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { self.children.is_none() }
}

/// Binary Huffman tree. The arena owns all nodes; the tree is addressed through its [root](HuffmanTree::root).
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId
}

impl GetSize for HuffmanTree {
    fn size_bytes_dyn(&self) -> usize { self.nodes.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.nodes.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl HuffmanTree {
    /// Returns the root.
    #[inline] pub fn root(&self) -> NodeId { self.root }

    /// Returns the node with given `id`.
    #[inline] pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id.index()] }

    #[inline] pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node { &mut self.nodes[id.index()] }

    /// Returns all nodes, indexed by [`NodeId::index`].
    #[inline] pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the number of nodes.
    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns the number of leaves, i.e. the number of distinct symbols.
    #[inline] pub fn leaves_count(&self) -> usize { (self.nodes.len() + 1) / 2 }

    /// Returns the weight of the root, which equals the total number of symbol occurrences.
    #[inline] pub fn weight(&self) -> u64 { self.node(self.root).weight }

    /// Returns the child of `id` reached by `bit` (`false` = left = `'0'`, `true` = right = `'1'`),
    /// or `None` if `id` is a leaf.
    #[inline] pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        self.node(id).children.map(|c| c[bit as usize])
    }

    /// Returns the number of edges between `id` and the root.
    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut result = 0;
        while let Some(parent) = self.node(id).parent {
            id = parent;
            result += 1;
        }
        result
    }

    /// Returns an iterator over the leaves, in ascending order of their symbols.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
            .take_while(|(_, n)| n.is_leaf())
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Sets the color of every internal node to [`Color::Unvisited`] and of every leaf to [`Color::Done`].
    pub fn reset_colors(&mut self) {
        for node in self.nodes.iter_mut() {
            node.color = if node.is_leaf() { Color::Done } else { Color::Unvisited };
        }
    }

    /// Returns the identifiers of all nodes in the in-order (left subtree, node, right subtree).
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut pending = Vec::new();
        let mut current = Some(self.root);
        loop {
            while let Some(id) = current {
                pending.push(id);
                current = self.node(id).left();
            }
            let Some(id) = pending.pop() else { return result; };
            result.push(id);
            current = self.node(id).right();
        }
    }

    /// Emits (at trace level) the colors of the leaves and then of the internal nodes, both in-order.
    pub fn log_colors(&self) {
        let order = self.in_order();
        for id in order.iter().filter(|id| self.node(**id).is_leaf()) {
            let node = self.node(*id);
            trace!(node = id.index(), symbol = ?node.symbol, color = ?node.color, "leaf");
        }
        for id in order.iter().filter(|id| !self.node(**id).is_leaf()) {
            let node = self.node(*id);
            trace!(node = id.index(), weight = node.weight, color = ?node.color, "internal");
        }
    }
}
