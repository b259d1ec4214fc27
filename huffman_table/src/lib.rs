#![doc = include_str!("../README.md")]

use std::io::Read;
use tracing::debug;

mod error;
pub use error::{Error, Result};
mod conf;
pub use conf::{BuildConf, SingleLeafCode};
mod frequencies;
pub use frequencies::{FrequencyTable, ALPHABET_SIZE};
mod queue;
pub use queue::{MinHeapQueue, Weighted};
mod tree;
pub use tree::{Color, HuffmanTree, Node, NodeId};
mod builder;
pub use builder::{NodeEntry, SymbolWeight, TreeBuilder, prune_and_count, seed_queue};
mod codes;
pub use codes::{CodeGenerator, CodeTable};

/// Counts the occurrences of each byte value in `stream`.
///
/// Fails with [`Error::Io`] if `stream` cannot be read; no partial frequencies are returned then.
#[inline] pub fn frequency_table<R: Read>(stream: R) -> Result<FrequencyTable> {
    FrequencyTable::count(stream)
}

/// Counts the occurrences of each byte value in `stream`, using the read buffer size given by `conf`.
#[inline] pub fn frequency_table_with_conf<R: Read>(stream: R, conf: &BuildConf) -> Result<FrequencyTable> {
    FrequencyTable::count_with_conf(stream, conf)
}

/// Builds the Huffman tree for the bytes that occur in `frequencies`
/// and returns it together with the codes of these bytes.
///
/// Fails with [`Error::EmptyInput`] if no byte occurs.
/// If only one byte occurs, the tree consists of a single leaf whose code is `"0"`.
#[inline] pub fn build_code_table(frequencies: &FrequencyTable) -> Result<(HuffmanTree, CodeTable)> {
    build_code_table_with_conf(frequencies, &BuildConf::default())
}

/// Same as [`build_code_table`], but the code of a single-leaf tree is given by `conf`.
pub fn build_code_table_with_conf(frequencies: &FrequencyTable, conf: &BuildConf) -> Result<(HuffmanTree, CodeTable)> {
    let mut tree = HuffmanTree::from_frequencies(frequencies)?;
    let codes = CodeGenerator::new(conf).generate(&mut tree);
    tree.log_colors();
    debug!(symbols = codes.len(), bits = codes.weighted_length(frequencies), "built code table");
    Ok((tree, codes))
}
