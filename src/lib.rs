//! # huffpack
//!
//! Lossless byte-stream compression with Huffman coding.
//!
//! The core is three operations:
//!
//! - [`build_code`] counts byte frequencies and builds a [`HuffmanTree`] plus the
//!   [`CodeTable`] derived from it.
//! - [`compress`] packs bytes into a [`BitStream`] using a code table.
//! - [`decompress`] walks the tree over exactly `bit_count` bits of a packed payload.
//!
//! The packed payload alone cannot be decoded: the tree and the exact bit count have to
//! travel with it. [`container`] defines a self-describing artifact that carries both,
//! and [`HuffmanCoding`] wraps it behind the [`Compressor`] trait.
//!
//! ```rust
//! use huffpack::{build_code, compress, decompress};
//!
//! let data = b"a baba da babble";
//! let (tree, codes) = build_code(data)?;
//! let stream = compress(data, &codes)?;
//! let restored = decompress(stream.bytes(), stream.bit_count(), &tree)?;
//! assert_eq!(restored, data);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

pub mod algorithms;
pub mod bits;
pub mod code;
pub mod compressor;
pub mod container;
pub mod error;
pub mod frequency;
pub mod timing;
pub mod tree;

#[cfg(test)]
mod tests;

pub use algorithms::huffman::HuffmanCoding;
pub use bits::{BitReader, BitStream, BitWriter, compress, decompress};
pub use code::{Code, CodeTable};
pub use compressor::{Compressor, CompressorExt, RoundTripTestResult};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId, build_code};
