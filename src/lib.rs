//! # Fixed-capacity LZW with byte-packed codes
//!
//! This crate compresses bytes or text with an adaptive dictionary coder in the LZW family and
//! packs the resulting codes into a byte stream. The dictionary has a fixed capacity, by default
//! 512 entries, and is reset to its 256 literal entries whenever it fills up. Every code is
//! written with the same width, `ceil(log2(capacity))` bits, most significant bit first.
//!
//! The compressed stream has no header. Both ends must agree on the dictionary size out of band.
//!
//! The crate is split into three layers:
//!
//!  * [`encode`] and [`decode`] translate between bytes and [`Symbol`]s.
//!  * [`transcode`] re-slices fixed-width units into another width.
//!  * [`codec`] composes both into the `compress`/`decompress` entry points.
//!
//! ```
//! let packed = lzwpack::compress_bytes(b"TOBEORNOTTOBEORTOBEORNOT#");
//! assert!(packed.len() < 25);
//! ```
//!
//! Note that in the default [`Trailing::Discard`] mode the last partial byte of the packed codes
//! is dropped, just as the stream format has always done. Use [`Trailing::Pad`] for a stream
//! that round-trips every input.
#![forbid(unsafe_code)]

/// The dictionary capacity used when none is configured.
pub const DEFAULT_DICT_SIZE: u32 = 512;
/// The smallest capacity, one learned phrase on top of the literals.
pub const MIN_DICT_SIZE: u32 = 257;
/// The largest capacity, all codes still fit into 16 bits.
pub const MAX_DICT_SIZE: u32 = 1 << 16;

/// Alias for a code point, either a literal byte or a dictionary index.
pub type Code = u16;

/// Number of literal entries every dictionary starts with.
pub(crate) const LITERALS: u32 = 256;

/// A coded unit of the dictionary coder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single byte that stands for itself.
    Literal(u8),
    /// A learned phrase, always at least 256.
    Index(Code),
}

impl Symbol {
    /// Interpret a raw code value, everything below 256 is a literal byte.
    pub fn from_code(code: Code) -> Self {
        if code < LITERALS as Code {
            Symbol::Literal(code as u8)
        } else {
            Symbol::Index(code)
        }
    }

    /// The numeric value written into the packed stream.
    pub fn code(self) -> Code {
        match self {
            Symbol::Literal(byte) => Code::from(byte),
            Symbol::Index(code) => code,
        }
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Literal(byte)
    }
}

/// The number of bits needed to write every code of a dictionary with `dict_size` entries.
pub const fn code_width(dict_size: u32) -> u8 {
    (32 - (dict_size - 1).leading_zeros()) as u8
}

pub(crate) fn check_dict_size(dict_size: u32) -> error::Result<u32> {
    if (MIN_DICT_SIZE..=MAX_DICT_SIZE).contains(&dict_size) {
        Ok(dict_size)
    } else {
        Err(error::LzwError::InvalidDictSize(dict_size))
    }
}

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod transcode;

pub use codec::{compress, compress_bytes, decompress, decompress_bytes, Codec, Stats, Trailing};
pub use error::{LzwError, Result};
