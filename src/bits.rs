use crate::code::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};

if_tracing! {
    use tracing::{debug, warn};
}

/// Packed output of [`compress`]: bytes filled most-significant-bit first, plus the exact
/// number of meaningful bits. The final byte is zero padded on the right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitStream {
    bytes: Vec<u8>,
    bit_count: u64,
}

impl BitStream {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Number of zero bits filling out the last byte.
    pub const fn padding_bits(&self) -> u8 {
        ((8 - self.bit_count % 8) % 8) as u8
    }
}

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: u64,
}

impl BitWriter {
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bits: u64) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8) as usize),
            bit_count: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = (self.bit_count % 8) as u32;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push_bit(bit);
        }
    }

    pub const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    pub fn finish(self) -> BitStream {
        BitStream {
            bytes: self.bytes,
            bit_count: self.bit_count,
        }
    }
}

/// Yields exactly `bit_count` bits of a packed payload, most-significant-bit first.
///
/// Construction checks that the payload is exactly `ceil(bit_count / 8)` bytes long and that
/// the padding in the final byte is zero. Padding is never yielded.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: u64,
    bit_count: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], bit_count: u64) -> Result<Self> {
        let available = bytes.len() as u64 * 8;
        if bit_count > available {
            return Err(HuffmanError::ShortPayload { bit_count, available });
        }

        let needed = bit_count.div_ceil(8) as usize;
        if bytes.len() > needed {
            return Err(HuffmanError::TrailingBytes {
                bit_count,
                extra: bytes.len() - needed,
            });
        }

        let used_in_last = (bit_count % 8) as u32;
        if used_in_last != 0 && bytes[needed - 1] & (0xff >> used_in_last) != 0 {
            return Err(HuffmanError::NonZeroPadding { bit_count });
        }

        Ok(Self {
            bytes,
            position: 0,
            bit_count,
        })
    }

    /// Index of the next bit to be read.
    pub const fn position(&self) -> u64 {
        self.position
    }

    pub const fn remaining(&self) -> u64 {
        self.bit_count - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position == self.bit_count {
            return None;
        }
        let byte = self.bytes[(self.position / 8) as usize];
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Concatenates the code of every byte of `data` into one packed bit stream.
///
/// # Errors
///
/// [`HuffmanError::UnknownSymbol`] for the first byte that has no code in `codes`.
pub fn compress(data: &[u8], codes: &CodeTable) -> Result<BitStream> {
    if_tracing! {
        debug!(target = "huffman", input_len = data.len(), symbols = codes.len(), "compress start");
    }

    let mut writer = BitWriter::with_capacity(data.len() as u64);
    for &byte in data {
        let Some(code) = codes.get(byte) else {
            if_tracing! {
                warn!(target = "huffman", byte, "byte missing from code table");
            }
            return Err(HuffmanError::UnknownSymbol(byte));
        };
        writer.push_code(code);
    }
    let stream = writer.finish();

    if_tracing! {
        debug!(target = "huffman", bit_count = stream.bit_count(), output_len = stream.bytes().len(), "compress complete");
    }

    Ok(stream)
}

/// Decodes the first `bit_count` bits of `packed` by walking `tree`.
///
/// Decoding succeeds only if the walk is back at the root exactly when the last bit is
/// consumed. Padding bits past `bit_count` are never interpreted.
///
/// # Errors
///
/// - [`HuffmanError::ShortPayload`], [`HuffmanError::TrailingBytes`] or
///   [`HuffmanError::NonZeroPadding`] if `packed` does not fit `bit_count`.
/// - [`HuffmanError::TruncatedStream`] if the bits run out between the root and a leaf.
/// - [`HuffmanError::PlaceholderLeaf`] if a code selects the placeholder of a single-symbol tree.
pub fn decompress(packed: &[u8], bit_count: u64, tree: &HuffmanTree) -> Result<Vec<u8>> {
    if_tracing! {
        debug!(target = "huffman", input_len = packed.len(), bit_count, "decompress start");
    }

    let mut reader = BitReader::new(packed, bit_count)?;
    let mut output = Vec::new();
    let root = tree.root();
    let mut cursor = root;
    let mut last_symbol_end = 0;

    while let Some(bit) = reader.next() {
        let Node::Internal { left, right, .. } = *tree.node(cursor) else {
            unreachable!("decoder cursor only rests on internal nodes");
        };
        let next = if bit { right } else { left };

        match *tree.node(next) {
            Node::Leaf { symbol, .. } => {
                if tree.is_placeholder(next) {
                    return Err(HuffmanError::PlaceholderLeaf {
                        position: reader.position(),
                    });
                }
                output.push(symbol);
                last_symbol_end = reader.position();
                cursor = root;
            }
            Node::Internal { .. } => cursor = next,
        }
    }

    if cursor != root {
        if_tracing! {
            warn!(target = "huffman", bit_count, last_symbol_end, "stream ends mid-code");
        }
        return Err(HuffmanError::TruncatedStream {
            bit_count,
            last_symbol_end,
        });
    }

    if_tracing! {
        debug!(target = "huffman", output_len = output.len(), "decompress complete");
    }

    Ok(output)
}
