use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrence count of every byte value in some input.
///
/// Only bytes with a non-zero count are considered present. Iteration is always in ascending
/// byte order, which is what keeps tree construction and the container header deterministic.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<u8, u64>", into = "BTreeMap<u8, u64>")]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub const fn new() -> Self {
        Self { counts: [0; 256] }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub const fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Sets the count for `byte`, returning the previous one. A count of zero removes the byte.
    pub fn insert(&mut self, byte: u8, count: u64) -> u64 {
        core::mem::replace(&mut self.counts[byte as usize], count)
    }

    /// Present bytes and their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX).map(|byte| (byte, self.get(byte))).filter(|&(_, count)| count > 0)
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts, or `None` if it overflows.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// Sum of all counts. For a table built with [`from_bytes`](Self::from_bytes) this is the input length.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (byte, count) in iter {
            table.insert(byte, count);
        }
        table
    }
}

impl From<BTreeMap<u8, u64>> for FrequencyTable {
    fn from(map: BTreeMap<u8, u64>) -> Self {
        map.into_iter().collect()
    }
}

impl From<FrequencyTable> for BTreeMap<u8, u64> {
    fn from(table: FrequencyTable) -> Self {
        table.iter().collect()
    }
}
