use thiserror::Error;

pub type Result<T, E = HuffmanError> = core::result::Result<T, E>;

/// Everything that can go wrong while building a code, packing bits, or unpacking them.
///
/// Every variant is a data or logic defect. Nothing here is transient, so callers should
/// never retry on these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// No tree can be built from zero symbols.
    #[error("cannot build a Huffman code from empty input")]
    EmptyInput,

    /// A byte handed to the encoder has no code. The table does not belong to this input.
    #[error("byte 0x{0:02x} has no entry in the code table")]
    UnknownSymbol(u8),

    /// The stream ran out while the decoder was between the root and a leaf.
    #[error("stream of {bit_count} bits ends mid-code, last complete symbol ended at bit {last_symbol_end}")]
    TruncatedStream { bit_count: u64, last_symbol_end: u64 },

    /// The declared bit count needs more bytes than the payload holds.
    #[error("stream declares {bit_count} bits but the payload only holds {available}")]
    ShortPayload { bit_count: u64, available: u64 },

    /// The payload holds whole bytes past the last one the bit count covers.
    #[error("stream declares {bit_count} bits but carries {extra} trailing byte(s) past them")]
    TrailingBytes { bit_count: u64, extra: usize },

    /// Padding in the final byte must be zero.
    #[error("padding bits after bit {bit_count} are not zero")]
    NonZeroPadding { bit_count: u64 },

    /// Only the lone symbol of a single-symbol tree is ever encoded; its sibling is never valid.
    #[error("code ending at bit {position} selects the placeholder leaf of a single-symbol tree")]
    PlaceholderLeaf { position: u64 },

    #[error("encoded length does not fit in 64 bits")]
    LengthOverflow,

    #[error("invalid code string {0:?}: expected a non-empty sequence of '0' and '1'")]
    InvalidCode(String),

    #[error("not a huffpack container (bad magic)")]
    BadMagic,

    #[error("malformed container header: {0}")]
    MalformedHeader(String),

    /// The header's bit count disagrees with what its own frequency table implies.
    #[error("container declares {declared} bits but its frequency table implies {expected}")]
    BitCountMismatch { declared: u64, expected: u64 },

    /// The decoded bytes do not have the symbol counts the header promised.
    #[error("decoded content does not match the frequency table in the header")]
    FrequencyMismatch,
}
