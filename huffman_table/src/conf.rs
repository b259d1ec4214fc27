//! Configuration of the frequency counting and code construction.

/// Code assigned to the only leaf of a tree built for an input with one distinct byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SingleLeafCode {
    /// The leaf gets one-bit code `"0"`, so each occurrence still costs one bit.
    #[default]
    OneBit,
    /// The leaf gets zero-length code `""`; only the number of occurrences carries information.
    Empty
}

impl SingleLeafCode {
    /// Returns the code string given to the single leaf.
    #[inline] pub fn as_str(&self) -> &'static str {
        match self {
            SingleLeafCode::OneBit => "0",
            SingleLeafCode::Empty => ""
        }
    }
}

/// Build configuration that is accepted by
/// [`frequency_table_with_conf`](crate::frequency_table_with_conf) and
/// [`build_code_table_with_conf`](crate::build_code_table_with_conf).
///
/// See field descriptions for details.
#[derive(Clone, Copy, Debug)]
pub struct BuildConf {
    /// Code of the only leaf of a degenerated, single-leaf tree. (default: [`SingleLeafCode::OneBit`])
    pub single_leaf_code: SingleLeafCode,

    /// Capacity (in bytes) of the buffer used to read the input stream.
    /// (default: [`BuildConf::DEFAULT_READ_BUFFER_SIZE`])
    ///
    /// The stream is still consumed byte by byte; the buffer only limits the number of `read` calls.
    pub read_buffer_size: usize
}

impl Default for BuildConf {
    fn default() -> Self {
        Self {
            single_leaf_code: SingleLeafCode::default(),
            read_buffer_size: Self::DEFAULT_READ_BUFFER_SIZE
        }
    }
}

impl BuildConf {
    /// The default value for [`read_buffer_size`](BuildConf::read_buffer_size).
    pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

    /// Returns configuration that uses custom [`single_leaf_code`](BuildConf::single_leaf_code).
    pub fn slc(single_leaf_code: SingleLeafCode) -> Self {
        Self { single_leaf_code, ..Default::default() }
    }

    /// Returns configuration that uses custom [`read_buffer_size`](BuildConf::read_buffer_size).
    pub fn rbs(read_buffer_size: usize) -> Self {
        Self { read_buffer_size, ..Default::default() }
    }
}
