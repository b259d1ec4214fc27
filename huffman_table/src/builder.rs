//! Construction of the Huffman tree by repeated merging of the two lightest nodes.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frequencies::{FrequencyTable, ALPHABET_SIZE};
use crate::queue::{MinHeapQueue, Weighted};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Byte value together with its number of occurrences.
///
/// Ordered by weight, ties are broken by the byte value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SymbolWeight {
    pub weight: u64,
    pub symbol: u8
}

impl Weighted for SymbolWeight {
    #[inline] fn weight(&self) -> u64 { self.weight }
}

/// Tree node waiting in the queue.
///
/// Ordered by weight, ties are broken by node identifier,
/// i.e. leaves first (in ascending order of symbols), then internal nodes in the order of creation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct NodeEntry {
    pub weight: u64,
    pub node: NodeId
}

impl Weighted for NodeEntry {
    #[inline] fn weight(&self) -> u64 { self.weight }
}

/// Returns a queue (not yet heap-ordered) with one element for each of the 256 byte values,
/// including the values that do not occur.
pub fn seed_queue(frequencies: &FrequencyTable) -> MinHeapQueue<SymbolWeight> {
    MinHeapQueue::from_unordered(frequencies.counts().iter().enumerate()
        .map(|(symbol, &weight)| SymbolWeight { weight, symbol: symbol as u8 })
        .collect())
}

/// Removes from the `queue` all symbols of zero weight, leaves it heap-ordered
/// and returns the number of remaining (live) symbols.
///
/// The heap is sorted descending first, so the symbols to remove form the tail of the array.
pub fn prune_and_count<T: Weighted>(queue: &mut MinHeapQueue<T>) -> usize {
    queue.build_heap();
    queue.heap_sort_descending();
    let pruned = queue.truncate_tail_while(|e| e.weight() == 0);
    queue.build_heap();
    trace!(pruned, live = queue.size(), "pruned symbols that do not occur");
    queue.size()
}

/// Builds the Huffman tree in its arena.
#[derive(Default, Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>
}

impl TreeBuilder {
    /// Creates a leaf for each symbol of the (pruned) `queue`, in ascending order of symbols,
    /// and returns the builder together with the queue of these leaves.
    /// The order of the returned queue is consistent with the order of `queue`.
    pub fn with_leaves(queue: MinHeapQueue<SymbolWeight>) -> (Self, MinHeapQueue<NodeEntry>) {
        let mut weights = [None; ALPHABET_SIZE];
        for e in queue.as_slice() { weights[e.symbol as usize] = Some(e.weight); }
        let mut ids = [NodeId(0); ALPHABET_SIZE];
        let mut nodes = Vec::with_capacity(2 * queue.size());
        for (symbol, weight) in weights.iter().enumerate() {
            if let Some(weight) = weight {
                ids[symbol] = NodeId(nodes.len() as u32);
                nodes.push(Node::leaf(symbol as u8, *weight));
            }
        }
        let queue = queue.map(|e| NodeEntry { weight: e.weight, node: ids[e.symbol as usize] });
        (Self { nodes }, queue)
    }

    /// Returns the number of nodes created so far.
    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns whether no node has been created yet.
    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Creates a new internal node whose left and right children are `x` and `y`, respectively.
    pub fn merge(&mut self, x: NodeEntry, y: NodeEntry) -> NodeEntry {
        let id = NodeId(self.nodes.len() as u32);
        let weight = x.weight + y.weight;
        self.nodes.push(Node::internal(weight, x.node, y.node));
        for child in [x.node, y.node] {
            let child = &mut self.nodes[child.index()];
            debug_assert!(child.parent.is_none(), "node merged twice");
            child.parent = Some(id);
        }
        trace!(left = x.node.index(), right = y.node.index(), node = id.index(), weight, "merged");
        NodeEntry { weight, node: id }
    }

    /// Repeatedly merges the two lightest nodes of the `queue` until only the root remains,
    /// and returns the tree. The `queue` is left empty.
    ///
    /// A queue with one leaf gives a single-leaf tree. An empty queue results in [`Error::EmptyInput`].
    pub fn build(mut self, queue: &mut MinHeapQueue<NodeEntry>) -> Result<HuffmanTree> {
        while queue.size() > 1 {
            let x = queue.extract_min().expect("queue of size > 1 must yield the first node");
            let y = queue.extract_min().expect("queue of size > 1 must yield the second node");
            let z = self.merge(x, y);
            queue.insert(z);
        }
        let root = queue.extract_min().ok_or(Error::EmptyInput)?;
        Ok(HuffmanTree { nodes: self.nodes, root: root.node })
    }
}

impl HuffmanTree {
    /// Builds the Huffman tree for the symbols of non-zero `frequencies`.
    ///
    /// Fails with [`Error::EmptyInput`] if all frequencies are zero.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue = seed_queue(frequencies);
        let live = prune_and_count(&mut queue);
        if live == 0 { return Err(Error::EmptyInput); }
        let (builder, mut queue) = TreeBuilder::with_leaves(queue);
        let tree = builder.build(&mut queue)?;
        debug!(symbols = live, nodes = tree.len(), weight = tree.weight(), "built huffman tree");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(queue: &MinHeapQueue<NodeEntry>) -> Vec<NodeEntry> {
        let mut queue = queue.clone();
        let mut result = Vec::new();
        while let Some(e) = queue.extract_min() { result.push(e); }
        result
    }

    #[test]
    fn seed_covers_all_bytes() {
        let queue = seed_queue(&FrequencyTable::from_bytes(b"ab"));
        assert_eq!(queue.size(), 256);
        assert_eq!(queue.as_slice()[b'a' as usize], SymbolWeight { weight: 1, symbol: b'a' });
    }

    #[test]
    fn prune() {
        let mut queue = seed_queue(&FrequencyTable::from_bytes(b"aaaabbbcc"));
        assert_eq!(prune_and_count(&mut queue), 3);
        assert!(queue.is_heap());
        assert_eq!(queue.extract_min(), Some(SymbolWeight { weight: 2, symbol: b'c' }));
        assert_eq!(queue.extract_min(), Some(SymbolWeight { weight: 3, symbol: b'b' }));
        assert_eq!(queue.extract_min(), Some(SymbolWeight { weight: 4, symbol: b'a' }));
        assert_eq!(queue.extract_min(), None);
    }

    #[test]
    fn prune_everything() {
        let mut queue = seed_queue(&FrequencyTable::new());
        assert_eq!(prune_and_count(&mut queue), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn leaves_in_symbol_order() {
        let mut queue = seed_queue(&FrequencyTable::from_bytes(b"zzyx"));
        prune_and_count(&mut queue);
        let (builder, queue) = TreeBuilder::with_leaves(queue);
        assert_eq!(builder.len(), 3);
        assert!(queue.is_heap());
        assert_eq!(entries(&queue), [
            NodeEntry { weight: 1, node: NodeId(0) },   // x
            NodeEntry { weight: 1, node: NodeId(1) },   // y
            NodeEntry { weight: 2, node: NodeId(2) }    // z
        ]);
    }

    #[test]
    fn merge_links_parent_and_children() {
        let mut queue = seed_queue(&FrequencyTable::from_bytes(b"aab"));
        prune_and_count(&mut queue);
        let (mut builder, mut queue) = TreeBuilder::with_leaves(queue);
        let x = queue.extract_min().unwrap();
        let y = queue.extract_min().unwrap();
        let z = builder.merge(x, y);
        assert_eq!(z, NodeEntry { weight: 3, node: NodeId(2) });
        queue.insert(z);
        let tree = builder.build(&mut queue).unwrap();
        assert!(queue.is_empty());
        let root = tree.node(tree.root());
        assert_eq!(root.symbol(), None);
        assert_eq!(root.left(), Some(NodeId(1)));   // b, lighter, extracted first
        assert_eq!(root.right(), Some(NodeId(0)));  // a
        assert_eq!(tree.node(NodeId(0)).parent(), Some(tree.root()));
        assert_eq!(tree.node(NodeId(1)).parent(), Some(tree.root()));
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn build_aaaabbbcc() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"aaaabbbcc")).unwrap();
        // a=0, b=1, c=2; c+b -> 3 (weight 5); a+3 -> 4 (weight 9)
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.weight(), 9);
        assert_eq!(tree.root(), NodeId(4));
        assert_eq!(tree.node(NodeId(3)).left(), Some(NodeId(2)));
        assert_eq!(tree.node(NodeId(3)).right(), Some(NodeId(1)));
        assert_eq!(tree.node(NodeId(3)).weight(), 5);
        assert_eq!(tree.node(NodeId(4)).left(), Some(NodeId(0)));
        assert_eq!(tree.node(NodeId(4)).right(), Some(NodeId(3)));
    }

    #[test]
    fn build_single_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"zzzz")).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves_count(), 1);
        let root = tree.node(tree.root());
        assert!(root.is_leaf());
        assert_eq!(root.symbol(), Some(b'z'));
        assert_eq!(root.weight(), 4);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn build_empty() {
        assert!(matches!(HuffmanTree::from_frequencies(&FrequencyTable::new()), Err(Error::EmptyInput)));
        let mut queue = MinHeapQueue::new();
        assert!(matches!(TreeBuilder::default().build(&mut queue), Err(Error::EmptyInput)));
    }

    #[test]
    fn every_non_root_node_has_one_parent() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1)).collect();
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data)).unwrap();
        assert_eq!(tree.leaves_count(), 256);
        assert_eq!(tree.len(), 511);
        assert_eq!(tree.weight(), data.len() as u64);
        let mut child_count = vec![0; tree.len()];
        for node in tree.nodes() {
            if let (Some(l), Some(r)) = (node.left(), node.right()) {
                child_count[l.index()] += 1;
                child_count[r.index()] += 1;
            }
        }
        for (i, node) in tree.nodes().iter().enumerate() {
            if i == tree.root().index() {
                assert_eq!(child_count[i], 0);
                assert_eq!(node.parent(), None);
            } else {
                assert_eq!(child_count[i], 1);
                let parent = tree.node(node.parent().unwrap());
                assert!(parent.left().map(NodeId::index) == Some(i) || parent.right().map(NodeId::index) == Some(i));
            }
        }
    }
}
