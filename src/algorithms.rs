//! Compressors available to huffpack.

pub mod huffman;
