//! The compress and decompress entry points.
//!
//! A [`Codec`] runs the dictionary coder and packs its symbols into bytes with a fixed code
//! width. The free functions use the default configuration: a 512 entry dictionary, nine bit
//! codes and [`Trailing::Discard`].
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::Result;
use crate::transcode::Transcoder;
use crate::{check_dict_size, code_width, Code, Symbol, DEFAULT_DICT_SIZE};

#[cfg(feature = "std")]
use std::io::{self, Read, Write};

/// How the final bits of the packed codes are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailing {
    /// Drop the last partial byte when packing and keep the last partial code when unpacking.
    ///
    /// This is the established stream format. Whenever the code bits do not end on a byte
    /// boundary the tail of the last code is lost, so the round-trip is only exact for inputs
    /// whose codes fill whole bytes.
    Discard,
    /// Pad the last byte with zeros when packing and ignore the partial code when unpacking.
    ///
    /// Codes are always wider than the at most seven padding bits, so every input round-trips.
    Pad,
}

/// Configuration of the packed format.
///
/// Both ends have to use the same configuration, the stream does not record it.
///
/// ```
/// use lzwpack::{Codec, Trailing};
///
/// let codec = Codec::with_dict_size(4096).unwrap().trailing(Trailing::Pad);
/// assert_eq!(codec.code_width(), 12);
///
/// let packed = codec.compress("TOBEORNOTTOBEORTOBEORNOT");
/// assert_eq!(codec.decompress(&packed).unwrap(), "TOBEORNOTTOBEORTOBEORNOT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    dict_size: u32,
    trailing: Trailing,
}

/// Sizes of one compress or decompress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// The length of the uncompressed data in bytes.
    pub original: usize,
    /// The length of the packed data in bytes.
    pub compressed: usize,
}

impl Codec {
    /// The default configuration.
    pub fn new() -> Self {
        Codec {
            dict_size: DEFAULT_DICT_SIZE,
            trailing: Trailing::Discard,
        }
    }

    /// Use a dictionary of `dict_size` entries, which also determines the code width.
    pub fn with_dict_size(dict_size: u32) -> Result<Self> {
        Ok(Codec {
            dict_size: check_dict_size(dict_size)?,
            ..Codec::new()
        })
    }

    /// Choose the handling of the final partial byte.
    pub fn trailing(self, trailing: Trailing) -> Self {
        Codec { trailing, ..self }
    }

    pub fn dict_size(&self) -> u32 {
        self.dict_size
    }

    /// The number of bits every code occupies in the packed stream.
    pub fn code_width(&self) -> u8 {
        code_width(self.dict_size)
    }

    /// Compress the UTF-8 bytes of `text`.
    pub fn compress(&self, text: &str) -> Vec<u8> {
        self.compress_bytes(text.as_bytes())
    }

    /// Compress arbitrary bytes.
    pub fn compress_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut symbols = Vec::with_capacity(data.len() / 2);
        Encoder::sized(self.dict_size).encode_all(data, &mut symbols);

        let codes: Vec<Code> = symbols.into_iter().map(Symbol::code).collect();
        let packed: Vec<u8> = self
            .packer()
            .transcode_masked(&codes)
            .into_iter()
            .map(|byte| byte as u8)
            .collect();

        tracing::debug!(
            original = data.len(),
            codes = codes.len(),
            compressed = packed.len(),
            "compressed"
        );
        packed
    }

    /// Decompress a packed stream and interpret the result as UTF-8 text.
    pub fn decompress(&self, packed: &[u8]) -> Result<String> {
        let data = self.decompress_bytes(packed)?;
        Ok(String::from_utf8(data)?)
    }

    /// Decompress a packed stream into bytes.
    ///
    /// Fails without returning any data if the stream contains a code that the dictionary can
    /// not have produced.
    pub fn decompress_bytes(&self, packed: &[u8]) -> Result<Vec<u8>> {
        let bytes: Vec<Code> = packed.iter().map(|&byte| Code::from(byte)).collect();
        let codes = self.unpacker().transcode_masked(&bytes);

        let mut decoder = Decoder::sized(self.dict_size);
        if let Err(err) = decoder.decode_all(codes.iter().map(|&code| Symbol::from_code(code))) {
            tracing::debug!(%err, compressed = packed.len(), "rejected stream");
            return Err(err);
        }

        let data = decoder.into_inner();
        tracing::debug!(
            compressed = packed.len(),
            codes = codes.len(),
            original = data.len(),
            "decompressed"
        );
        Ok(data)
    }

    /// Compress everything `read` yields and write the packed stream to `write`.
    ///
    /// The input is read into memory as a whole before any output is produced.
    #[cfg(feature = "std")]
    pub fn compress_reader(&self, mut read: impl Read, mut write: impl Write) -> io::Result<Stats> {
        let mut data = vec![];
        read.read_to_end(&mut data)?;
        let packed = self.compress_bytes(&data);
        write.write_all(&packed)?;
        write.flush()?;
        Ok(Stats {
            original: data.len(),
            compressed: packed.len(),
        })
    }

    /// Decompress everything `read` yields and write the data to `write`.
    ///
    /// An invalid stream is reported as [`io::ErrorKind::InvalidData`] and nothing is written.
    #[cfg(feature = "std")]
    pub fn decompress_reader(&self, mut read: impl Read, mut write: impl Write) -> io::Result<Stats> {
        let mut packed = vec![];
        read.read_to_end(&mut packed)?;
        let data = self
            .decompress_bytes(&packed)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        write.write_all(&data)?;
        write.flush()?;
        Ok(Stats {
            original: data.len(),
            compressed: packed.len(),
        })
    }

    fn packer(&self) -> Transcoder {
        let discard = match self.trailing {
            Trailing::Discard => true,
            Trailing::Pad => false,
        };
        Transcoder::with_widths(self.code_width(), 8).discard_incomplete(discard)
    }

    fn unpacker(&self) -> Transcoder {
        let discard = match self.trailing {
            Trailing::Discard => false,
            Trailing::Pad => true,
        };
        Transcoder::with_widths(8, self.code_width()).discard_incomplete(discard)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::new()
    }
}

impl Default for Trailing {
    fn default() -> Self {
        Trailing::Discard
    }
}

impl Stats {
    /// Compressed size as a fraction of the original size, `None` for empty input.
    pub fn ratio(&self) -> Option<f64> {
        if self.original == 0 {
            None
        } else {
            Some(self.compressed as f64 / self.original as f64)
        }
    }
}

/// Compress `text` with the default configuration.
pub fn compress(text: &str) -> Vec<u8> {
    Codec::new().compress(text)
}

/// Compress `data` with the default configuration.
pub fn compress_bytes(data: &[u8]) -> Vec<u8> {
    Codec::new().compress_bytes(data)
}

/// Decompress text packed with the default configuration.
pub fn decompress(packed: &[u8]) -> Result<String> {
    Codec::new().decompress(packed)
}

/// Decompress bytes packed with the default configuration.
pub fn decompress_bytes(packed: &[u8]) -> Result<Vec<u8>> {
    Codec::new().decompress_bytes(packed)
}
