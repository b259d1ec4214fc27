//! Assigning codes to the leaves of the Huffman tree.

use dyn_size_of::GetSize;
use tracing::debug;

use crate::conf::{BuildConf, SingleLeafCode};
use crate::frequencies::{FrequencyTable, ALPHABET_SIZE};
use crate::tree::{Color, HuffmanTree, NodeId};

/// Codes of the byte values, as strings of `'0'` and `'1'` characters.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodeTable {
    codes: [Option<String>; ALPHABET_SIZE]
}

impl Default for CodeTable {
    fn default() -> Self { Self { codes: std::array::from_fn(|_| None) } }
}

impl GetSize for CodeTable {
    fn size_bytes_dyn(&self) -> usize {
        self.codes.iter().flatten().map(String::capacity).sum()
    }
    fn size_bytes_content_dyn(&self) -> usize {
        self.codes.iter().flatten().map(String::len).sum()
    }
    const USES_DYN_MEM: bool = true;
}

impl CodeTable {
    /// Constructs the table without any code.
    #[inline] pub fn new() -> Self { Self::default() }

    #[inline] pub(crate) fn set(&mut self, symbol: u8, code: &str) {
        self.codes[symbol as usize] = Some(code.to_owned());
    }

    /// Returns the code of `symbol` or `None` if `symbol` has no code (does not occur).
    #[inline] pub fn get(&self, symbol: u8) -> Option<&str> { self.codes[symbol as usize].as_deref() }

    /// Returns the length (in bits) of the code of `symbol`, or `None` if `symbol` has no code.
    #[inline] pub fn code_len(&self, symbol: u8) -> Option<usize> { self.get(symbol).map(str::len) }

    /// Returns the number of symbols that have codes.
    pub fn len(&self) -> usize { self.codes.iter().flatten().count() }

    /// Returns whether no symbol has a code.
    pub fn is_empty(&self) -> bool { self.codes.iter().all(Option::is_none) }

    /// Returns an iterator over `(symbol, code)` pairs, in ascending order of symbols.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.codes.iter().enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|c| (s as u8, c)))
    }

    /// Returns the length of the longest code, or `0` if there are no codes.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Returns the total length (in bits) of the codes of all bytes counted in `frequencies`,
    /// i.e. the sum of weight × code length. Bytes without codes are not counted.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter().map(|(s, c)| frequencies.get(s) * c.len() as u64).sum()
    }

    /// Returns whether no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.iter().map(|(_, c)| c).collect();
        codes.sort_unstable();
        // in lexicographic order, a code that is a prefix of another one is also a prefix of its successor
        codes.windows(2).all(|w| !w[1].starts_with(w[0]))
    }
}

/// Generates codes by walking the Huffman tree without recursion and without a stack.
///
/// Each walk starts at the root and follows the node colors: an [`Unvisited`](Color::Unvisited)
/// node is left through its left child (appending `'0'`), a [`LeftDone`](Color::LeftDone)
/// one through its right child (appending `'1'`). Reaching a leaf completes its code,
/// and its ancestors are promoted to record which subtrees are fully explored.
/// The generation ends when the root becomes [`Done`](Color::Done).
///
/// The time complexity is *O(leaves × height)*.
#[derive(Clone, Copy, Default, Debug)]
pub struct CodeGenerator {
    single_leaf_code: SingleLeafCode
}

impl CodeGenerator {
    /// Constructs the generator configured by `conf`.
    pub fn new(conf: &BuildConf) -> Self {
        Self { single_leaf_code: conf.single_leaf_code }
    }

    /// Returns the codes of all leaves of `tree`.
    ///
    /// The colors of the `tree` nodes are reset at the beginning, so the method can be called many times.
    pub fn generate(&self, tree: &mut HuffmanTree) -> CodeTable {
        let mut table = CodeTable::new();
        let root = tree.root();
        if let Some(symbol) = tree.node(root).symbol() {
            table.set(symbol, self.single_leaf_code.as_str());
            debug!(symbol, code = self.single_leaf_code.as_str(), "single-leaf tree");
            return table;
        }
        tree.reset_colors();
        let mut code = String::with_capacity(tree.leaves_count());
        let mut cursor = root;
        while tree.node(root).color() != Color::Done {
            let node = tree.node(cursor);
            match (node.color(), node.left(), node.right()) {
                (Color::Unvisited, Some(left), _) => {
                    code.push('0');
                    cursor = left;
                }
                (Color::LeftDone, _, Some(right)) => {
                    code.push('1');
                    cursor = right;
                }
                _ => {
                    debug_assert!(node.is_leaf(), "only leaves are reached in Done state");
                    if let Some(symbol) = node.symbol() { table.set(symbol, &code); }
                    Self::promote_ancestors(tree, cursor);
                    cursor = root;
                    code.clear();
                }
            }
        }
        debug!(codes = table.len(), max_len = table.max_code_len(), "generated codes");
        table
    }

    /// Promotes the color of the parent of `id`, and, as long as the promoted node becomes `Done`,
    /// of its ancestors. Stops at the root.
    fn promote_ancestors(tree: &mut HuffmanTree, mut id: NodeId) {
        while let Some(parent) = tree.node(id).parent() {
            let node = tree.node_mut(parent);
            node.color = node.color.promoted();
            if node.color != Color::Done { return; }
            id = parent;
        }
    }
}
