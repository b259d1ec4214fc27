//! Tools to count frequencies of bytes.

use std::io::{BufReader, Read};
use fsum::FSum;
use dyn_size_of::GetSize;
use tracing::debug;

use crate::conf::BuildConf;
use crate::error::Result;

/// Number of distinct byte values, i.e. the size of the alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Numbers of occurrences of all 256 byte values.
///
/// The domain is dense: every byte value has an entry, initially `0`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE]
}

impl Default for FrequencyTable {
    #[inline] fn default() -> Self { Self { counts: [0; ALPHABET_SIZE] } }
}

impl GetSize for FrequencyTable {}

impl FrequencyTable {
    /// Constructs the table with all counts equal to `0`.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs the table that counts all bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::with_counted_all(bytes.iter().copied())
    }

    /// Constructs the table that counts all bytes exposed by `iter`.
    pub fn with_counted_all<Iter: IntoIterator<Item = u8>>(iter: Iter) -> Self {
        let mut result = Self::default();
        result.count_all(iter);
        result
    }

    /// Reads `stream` one byte at a time (through a buffer of the default size)
    /// and counts the occurrences of each byte value.
    ///
    /// Fails with [`Error::Io`](crate::Error::Io) if `stream` cannot be read;
    /// no partial table is returned then.
    #[inline] pub fn count<R: Read>(stream: R) -> Result<Self> {
        Self::count_with_conf(stream, &BuildConf::default())
    }

    /// Same as [`count`](FrequencyTable::count), but reads with
    /// a buffer of [`conf.read_buffer_size`](BuildConf::read_buffer_size) bytes.
    pub fn count_with_conf<R: Read>(stream: R, conf: &BuildConf) -> Result<Self> {
        let mut result = Self::default();
        for byte in BufReader::with_capacity(conf.read_buffer_size, stream).bytes() {
            result.add(byte?);
        }
        debug!(bytes = result.total(), distinct = result.distinct(), "counted byte frequencies");
        Ok(result)
    }

    /// Adds one to the stored number of `byte` occurrences.
    #[inline] pub fn add(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
    }

    /// Calls `add` for all bytes exposed by `iter`.
    pub fn count_all<Iter: IntoIterator<Item = u8>>(&mut self, iter: Iter) {
        for b in iter { self.add(b); }
    }

    /// Returns the number of occurrences of `byte`.
    #[inline] pub fn get(&self, byte: u8) -> u64 { self.counts[byte as usize] }

    /// Returns the counts of all byte values, indexed by byte.
    #[inline] pub fn counts(&self) -> &[u64; ALPHABET_SIZE] { &self.counts }

    /// Returns the total number of bytes counted.
    pub fn total(&self) -> u64 { self.counts.iter().sum() }

    /// Returns the number of distinct byte values that occur at least once.
    pub fn distinct(&self) -> usize { self.counts.iter().filter(|c| **c != 0).count() }

    /// Returns whether no byte has been counted.
    #[inline] pub fn is_empty(&self) -> bool { self.counts.iter().all(|c| *c == 0) }

    /// Returns an iterator over `(byte, count)` pairs with non-zero count, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(b, c)| (b as u8, *c))
    }

    /// Returns the Shannon entropy (in bits per byte) of the bytes counted so far,
    /// or `0` if nothing has been counted.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 0.0; }
        let sum = total as f64;
        - FSum::with_all(self.iter()
            .map(|(_, c)| { let p = c as f64 / sum; p * p.log2() })).value()
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<Iter: IntoIterator<Item = u8>>(iter: Iter) -> Self {
        Self::with_counted_all(iter)
    }
}
