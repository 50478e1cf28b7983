//! Self-describing artifact around a packed Huffman payload.
//!
//! The packed bits alone cannot be decoded without the tree and the exact bit count, so the
//! container stores both up front. The tree is not written out node by node: the frequency
//! table is stored instead and the tree is rebuilt from it, which gives the identical tree
//! because construction is deterministic.
//!
//! | Field       | Encoding                     | Meaning                                 |
//! |-------------|------------------------------|-----------------------------------------|
//! | magic       | 4 bytes, `HUF\x01`           | format and version                      |
//! | symbols     | varint                       | number of distinct bytes, `0..=256`     |
//! | entries     | `symbols` × (u8, varint)     | byte and count, strictly ascending      |
//! | bit_count   | varint                       | meaningful bits in the payload          |
//! | payload     | `ceil(bit_count / 8)` bytes  | packed codes, MSB first, zero padded    |
//!
//! Varints are unsigned LEB128. An empty input is stored as the magic followed by two zero
//! varints and no payload.

use serde::{Deserialize, Serialize};

use crate::bits::{compress, decompress};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

if_tracing! {
    use tracing::{debug, info, warn};
}

pub const MAGIC: [u8; 4] = *b"HUF\x01";

/// Longest LEB128 encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

/// Appends `value` as unsigned LEB128.
pub fn write_varint(value: u64, buf: &mut Vec<u8>) {
    let mut value = value;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Decodes an unsigned LEB128 value from the front of `buf`.
///
/// Returns `(value, bytes_consumed)` on success.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (index, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        let shift = 7 * index as u32;
        let low = u64::from(byte & 0x7f);
        if shift == 63 && low > 1 {
            return Err(HuffmanError::MalformedHeader("varint overflows u64".into()));
        }
        value |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }

    if buf.len() >= MAX_VARINT_LEN {
        Err(HuffmanError::MalformedHeader("varint longer than 10 bytes".into()))
    } else {
        Err(HuffmanError::MalformedHeader("header ends inside a varint".into()))
    }
}

/// Everything needed to decode a payload: the symbol counts and the exact bit count.
///
/// Also used as the JSON sidecar for raw payloads written without a container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub frequencies: FrequencyTable,
    pub bit_count: u64,
}

impl Header {
    /// Length of the original input.
    pub fn original_len(&self) -> u64 {
        self.frequencies.total()
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        write_varint(self.frequencies.distinct() as u64, buf);
        for (byte, count) in self.frequencies.iter() {
            buf.push(byte);
            write_varint(count, buf);
        }
        write_varint(self.bit_count, buf);
    }

    /// Parses a header from the front of `data`, returning it with the offset of the payload.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < MAGIC.len() || data[..MAGIC.len()] != MAGIC {
            return Err(HuffmanError::BadMagic);
        }
        let mut reader = HeaderReader {
            data,
            offset: MAGIC.len(),
        };

        let symbols = reader.varint()?;
        if symbols > 256 {
            return Err(HuffmanError::MalformedHeader(format!("{} distinct symbols declared", symbols)));
        }

        let mut frequencies = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        for _ in 0..symbols {
            let byte = reader.byte()?;
            if previous.is_some_and(|prev| byte <= prev) {
                return Err(HuffmanError::MalformedHeader(format!(
                    "symbol 0x{:02x} out of order or repeated",
                    byte
                )));
            }
            let count = reader.varint()?;
            if count == 0 {
                return Err(HuffmanError::MalformedHeader(format!("symbol 0x{:02x} has zero count", byte)));
            }
            frequencies.insert(byte, count);
            previous = Some(byte);
        }

        if frequencies.checked_total().is_none() {
            return Err(HuffmanError::MalformedHeader("symbol counts overflow u64".into()));
        }

        let bit_count = reader.varint()?;
        Ok((Self { frequencies, bit_count }, reader.offset))
    }
}

struct HeaderReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl HeaderReader<'_> {
    fn byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.offset)
            .ok_or_else(|| HuffmanError::MalformedHeader("header ends inside the symbol table".into()))?;
        self.offset += 1;
        Ok(byte)
    }

    fn varint(&mut self) -> Result<u64> {
        let (value, len) = read_varint(&self.data[self.offset..])?;
        self.offset += len;
        Ok(value)
    }
}

/// Compresses `data` into a self-describing container.
pub fn pack(data: &[u8]) -> Result<Vec<u8>> {
    if_tracing! {
        debug!(target = "container", input_len = data.len(), "pack start");
    }

    let (header, payload) = encode_payload(data)?;

    let mut out = Vec::with_capacity(MAGIC.len() + payload.len() + 16);
    header.write_to(&mut out);
    let header_len = out.len();
    out.extend_from_slice(&payload);

    if_tracing! {
        info!(target = "container", input_len = data.len(), header_len, payload_len = payload.len(), bit_count = header.bit_count, "pack complete");
    }
    if_not_tracing! {
        let _ = header_len;
    }

    Ok(out)
}

/// Compresses `data` into a bare payload plus the header needed to decode it.
///
/// Empty input yields the default header and no payload.
pub fn encode_payload(data: &[u8]) -> Result<(Header, Vec<u8>)> {
    let frequencies = FrequencyTable::from_bytes(data);
    if frequencies.is_empty() {
        return Ok((Header::default(), Vec::new()));
    }

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let stream = compress(data, &tree.code_table())?;
    let header = Header {
        frequencies,
        bit_count: stream.bit_count(),
    };
    Ok((header, stream.into_bytes()))
}

/// Restores the original bytes from a container produced by [`pack`].
pub fn unpack(artifact: &[u8]) -> Result<Vec<u8>> {
    let (header, offset) = Header::parse(artifact)?;

    if_tracing! {
        debug!(target = "container", input_len = artifact.len(), header_len = offset, symbols = header.frequencies.distinct(), bit_count = header.bit_count, "unpack start");
    }

    let output = decode_payload(&header, &artifact[offset..]);

    if_tracing! {
        match &output {
            Ok(output) => info!(target = "container", output_len = output.len(), "unpack complete"),
            Err(err) => warn!(target = "container", error = %err, "unpack failed"),
        }
    }

    output
}

/// Decodes a bare payload using a separately stored header.
///
/// # Errors
///
/// Besides the decoder's own errors, [`HuffmanError::BitCountMismatch`] if the bit count
/// disagrees with the frequency table and [`HuffmanError::FrequencyMismatch`] if the decoded
/// bytes do not have the declared counts.
pub fn decode_payload(header: &Header, payload: &[u8]) -> Result<Vec<u8>> {
    if header.frequencies.is_empty() {
        if header.bit_count != 0 || !payload.is_empty() {
            return Err(HuffmanError::MalformedHeader("empty symbol table with a non-empty payload".into()));
        }
        return Ok(Vec::new());
    }
    let tree = HuffmanTree::from_frequencies(&header.frequencies)?;
    let expected = tree.code_table().encoded_bits(&header.frequencies)?;
    if expected != header.bit_count {
        return Err(HuffmanError::BitCountMismatch {
            declared: header.bit_count,
            expected,
        });
    }

    let output = decompress(payload, header.bit_count, &tree)?;
    if FrequencyTable::from_bytes(&output) != header.frequencies {
        return Err(HuffmanError::FrequencyMismatch);
    }
    Ok(output)
}
