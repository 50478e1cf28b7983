use std::fmt::Display;

use crate::compressor::{Compressor, CompressorExt, Result};
use crate::container;
use crate::timing::time_fn;

if_tracing! {
    use tracing::info;
}

/// Huffman coding wrapped in the self-describing [`container`] format.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "compressor", kind = "huffman", func = "compress");
            let _enter = span.enter();
        }
        let (res, d) = time_fn(|| container::pack(data));
        if_tracing! {
            if let Ok(ref out) = res {
                info!(elapsed_us = %d.as_micros(), input_len = data.len(), out_len = out.len(), "huffman compress finished");
            }
        }
        if_not_tracing! {
            let _ = d;
        }
        Ok(res?)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "compressor", kind = "huffman", func = "decompress");
            let _enter = span.enter();
        }
        let (res, d) = time_fn(|| container::unpack(data));
        if_tracing! {
            if let Ok(ref out) = res {
                info!(elapsed_us = %d.as_micros(), input_len = data.len(), out_len = out.len(), "huffman decompress finished");
            }
        }
        if_not_tracing! {
            let _ = d;
        }
        Ok(res?)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl CompressorExt for HuffmanCoding {
    fn format_validity_check(&mut self, data: &[u8]) -> Result<bool> {
        Ok(container::Header::parse(data).is_ok())
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["huffman", "huff", "huffcode", "huffman_coding"]
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Huffman Coding")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffmanError;

    #[test]
    fn corrupt_artifact_surfaces_typed_error() {
        let err = HuffmanCoding.decompress_bytes(b"not a container").unwrap_err();
        assert_eq!(err.downcast_ref::<HuffmanError>(), Some(&HuffmanError::BadMagic));
    }

    #[test]
    fn name_is_human_readable() {
        assert_eq!(HuffmanCoding.compressor_name(), "Huffman Coding");
    }

    #[test]
    fn aliases_are_lowercase_identifiers() {
        let aliases = HuffmanCoding.aliases();
        assert_eq!(aliases.first(), Some(&"huffman"));
        for alias in aliases {
            assert!(alias.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'), "{}", alias);
        }
        assert!(HuffmanCoding.debug_name().ends_with("HuffmanCoding"));
    }

    #[test]
    fn validity_check_looks_at_header_only() {
        let mut compressor = HuffmanCoding;
        let artifact = compressor.compress_bytes(b"aabbc").unwrap();
        assert!(compressor.format_validity_check(&artifact).unwrap());
        assert!(!compressor.format_validity_check(b"not a container").unwrap());

        // a damaged payload still has a valid header; only decoding finds the problem
        let mut damaged = artifact.clone();
        let last = damaged.len() - 1;
        damaged[last] = 0xff;
        assert!(compressor.format_validity_check(&damaged).unwrap());
        assert!(compressor.decompress_bytes(&damaged).is_err());
    }
}
