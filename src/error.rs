//! The error type shared by all coding steps.
use crate::Code;

/// Everything that can go wrong while packing or coding a stream.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LzwError {
    /// A code that is neither in the dictionary nor the next one to be assigned.
    ///
    /// The stream was not produced by a compressor with the same dictionary size, or it was
    /// modified afterwards.
    #[error("badly compressed: code {code} is unknown, next dictionary entry is {next}")]
    InvalidCode {
        /// The offending code.
        code: Code,
        /// The index the decoder would have assigned next.
        next: Code,
    },

    /// A value handed to the transcoder does not fit into its source width.
    #[error("value {value} does not fit into {width} bits")]
    CodeTooWide { value: Code, width: u8 },

    /// A transcoder unit width outside of `1..=16`.
    #[error("unit width {0} is not within 1..=16 bits")]
    InvalidWidth(u8),

    /// A dictionary capacity that can not hold the literals or does not fit 16-bit codes.
    #[error("dictionary size {0} is not within 257..=65536")]
    InvalidDictSize(u32),

    /// The decompressed bytes are not the UTF-8 text the facade promised.
    #[error("decompressed data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = core::result::Result<T, LzwError>;
