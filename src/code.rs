use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// The bit string assigned to one byte value, first bit first.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub const fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn starts_with(&self, prefix: &Code) -> bool {
        self.bits.starts_with(&prefix.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(HuffmanError::InvalidCode(s.to_string()));
        }
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(HuffmanError::InvalidCode(s.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

impl TryFrom<String> for Code {
    type Error = HuffmanError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// Mapping from byte value to its [`Code`].
///
/// Tables derived from a [`HuffmanTree`](crate::HuffmanTree) are prefix-free by construction.
/// Tables assembled by hand are not checked on insert; use [`is_prefix_free`](Self::is_prefix_free).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub const fn new() -> Self {
        Self { codes: BTreeMap::new() }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn insert(&mut self, byte: u8, code: Code) -> Option<Code> {
        self.codes.insert(byte, code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether no code is a prefix of another (and no code is empty).
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        if sorted.iter().any(|code| code.is_empty()) {
            return false;
        }
        // In lexicographic order a code is followed directly by anything it prefixes.
        sorted.sort();
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Number of bits [`compress`](crate::compress) produces for an input with these counts.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Result<u64> {
        frequencies.iter().try_fold(0u64, |acc, (byte, count)| {
            let code = self.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
            count
                .checked_mul(code.len() as u64)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or(HuffmanError::LengthOverflow)
        })
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
