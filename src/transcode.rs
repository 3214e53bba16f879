//! Re-slicing of fixed-width units.
//!
//! The transcoder knows nothing about dictionaries. It concatenates the bits of every input unit,
//! most significant bit first, and cuts the resulting bit string into units of another width.
//! Packing codes into bytes and unpacking bytes into codes are the same operation with the widths
//! swapped.
use crate::error::{LzwError, Result};
use crate::Code;

/// The widest unit the transcoder handles.
pub const MAX_WIDTH: u8 = 16;

/// A reusable transcoding configuration.
///
/// ```
/// use lzwpack::transcode::Transcoder;
///
/// let pack = Transcoder::new(3, 8).unwrap().discard_incomplete(true);
/// let bytes = pack.transcode(&[0b101, 0b011, 0b111]).unwrap();
/// assert_eq!(bytes, [0b1010_1111]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoder {
    from: u8,
    to: u8,
    discard_incomplete: bool,
}

struct MsbBuffer {
    /// The buffer bits.
    buffer: u64,
    /// The number of valid buffer bits.
    bits_in_buffer: u8,
}

impl Transcoder {
    /// Transcode units of `from` bits into units of `to` bits.
    ///
    /// A trailing unit shorter than `to` bits is kept and padded with zeros on the right, see
    /// [`discard_incomplete`](#method.discard_incomplete) to drop it instead.
    pub fn new(from: u8, to: u8) -> Result<Self> {
        Ok(Transcoder {
            from: check_width(from)?,
            to: check_width(to)?,
            discard_incomplete: false,
        })
    }

    /// A transcoder for widths already known to be within `1..=16`.
    pub(crate) fn with_widths(from: u8, to: u8) -> Self {
        debug_assert!(check_width(from).is_ok() && check_width(to).is_ok());
        Transcoder {
            from,
            to,
            discard_incomplete: false,
        }
    }

    /// Choose whether a trailing unit shorter than the target width is dropped.
    pub fn discard_incomplete(self, discard_incomplete: bool) -> Self {
        Transcoder {
            discard_incomplete,
            ..self
        }
    }

    /// The width of input units.
    pub fn from_width(&self) -> u8 {
        self.from
    }

    /// The width of output units.
    pub fn to_width(&self) -> u8 {
        self.to
    }

    /// Re-slice all of `inp`.
    ///
    /// Fails if any value has bits set above the input width.
    pub fn transcode(&self, inp: &[Code]) -> Result<Vec<Code>> {
        if let Some(&value) = inp.iter().find(|&&value| u32::from(value) >> self.from != 0) {
            return Err(LzwError::CodeTooWide {
                value,
                width: self.from,
            });
        }

        Ok(self.transcode_masked(inp))
    }

    /// Re-slice all of `inp`, ignoring bits above the input width.
    pub(crate) fn transcode_masked(&self, inp: &[Code]) -> Vec<Code> {
        let total_bits = inp.len() * usize::from(self.from);
        let mut out = Vec::with_capacity(total_bits / usize::from(self.to) + 1);
        let mut buffer = MsbBuffer::new();
        let mask = ((1u32 << self.from) - 1) as Code;

        for &value in inp {
            buffer.buffer_code(value & mask, self.from);
            while let Some(unit) = buffer.take(self.to) {
                out.push(unit);
            }
        }

        if !self.discard_incomplete {
            out.extend(buffer.take_padded(self.to));
        }

        out
    }
}

/// Re-slice `inp` from units of `from` bits into units of `to` bits in one call.
///
/// ```
/// use lzwpack::transcode::pack;
///
/// // Six bits do not make a byte.
/// assert!(pack(&[0b101, 0b011], 3, 8, true).unwrap().is_empty());
/// ```
pub fn pack(inp: &[Code], from: u8, to: u8, discard_incomplete: bool) -> Result<Vec<Code>> {
    Transcoder::new(from, to)?
        .discard_incomplete(discard_incomplete)
        .transcode(inp)
}

fn check_width(width: u8) -> Result<u8> {
    if (1..=MAX_WIDTH).contains(&width) {
        Ok(width)
    } else {
        Err(LzwError::InvalidWidth(width))
    }
}

impl MsbBuffer {
    fn new() -> Self {
        MsbBuffer {
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    // Never holds more than two units worth of bits, so all shifts stay below 64.
    fn buffer_code(&mut self, code: Code, size: u8) {
        let shift = 64 - self.bits_in_buffer - size;
        self.buffer |= u64::from(code) << shift;
        self.bits_in_buffer += size;
    }

    fn take(&mut self, size: u8) -> Option<Code> {
        if self.bits_in_buffer < size {
            return None;
        }

        let unit = (self.buffer >> (64 - size)) as Code;
        self.buffer <<= size;
        self.bits_in_buffer -= size;
        Some(unit)
    }

    /// Take the remaining bits as one unit, padded with zeros on the right.
    fn take_padded(&mut self, size: u8) -> Option<Code> {
        if self.bits_in_buffer == 0 {
            return None;
        }

        self.bits_in_buffer = size;
        self.take(size)
    }
}
