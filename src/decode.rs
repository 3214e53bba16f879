//! A module for all decoding needs.
use crate::error::{LzwError, Result};
use crate::{check_dict_size, Code, Symbol, DEFAULT_DICT_SIZE, LITERALS};

/// The dictionary decompressor.
///
/// Every symbol resolves to a phrase that is appended to the decoded data. Learned phrases are
/// not stored separately: each one is the previous phrase plus the first byte of its successor,
/// which is exactly a span of the data decoded so far.
///
/// ```
/// use lzwpack::{decode::Decoder, Symbol};
///
/// let mut decoder = Decoder::new();
/// decoder.push(Symbol::Literal(b'a')).unwrap();
/// decoder.push(Symbol::Literal(b'b')).unwrap();
/// assert_eq!(decoder.push(Symbol::Index(256)).unwrap(), b"ab");
/// assert_eq!(decoder.into_inner(), b"abab");
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    /// The configured dictionary capacity.
    dict_size: u32,
    /// The table of learned phrases.
    table: Table,
    /// The span of the previously decoded phrase.
    last: Option<Span>,
    /// All data decoded so far.
    decoded: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    len: usize,
}

/// Learned phrases from code 256 onwards.
#[derive(Debug, Clone, Default)]
struct Table {
    inner: Vec<Span>,
}

impl Decoder {
    /// A decoder with the default dictionary of 512 entries.
    pub fn new() -> Self {
        Decoder {
            dict_size: DEFAULT_DICT_SIZE,
            table: Table::default(),
            last: None,
            decoded: Vec::new(),
        }
    }

    /// A decoder whose dictionary resets once it holds `dict_size` entries.
    ///
    /// This must match the size the data was encoded with.
    pub fn with_dict_size(dict_size: u32) -> Result<Self> {
        Ok(Decoder::sized(check_dict_size(dict_size)?))
    }

    pub(crate) fn sized(dict_size: u32) -> Self {
        Decoder {
            dict_size,
            ..Decoder::new()
        }
    }

    /// Decode one symbol, returning the bytes it stands for.
    ///
    /// A code that is neither known nor the next one to be learned is rejected with
    /// [`LzwError::InvalidCode`] and leaves the decoder unchanged.
    pub fn push(&mut self, symbol: Symbol) -> Result<&[u8]> {
        let code = symbol.code();
        let next = self.table.next_code();
        let start = self.decoded.len();

        let len = if let Some(byte) = literal(code) {
            self.decoded.push(byte);
            1
        } else if let Some(entry) = self.table.at(code) {
            self.decoded
                .extend_from_within(entry.start..entry.start + entry.len);
            entry.len
        } else {
            match self.last {
                // The encoder used the phrase in the same step it learned it, so the phrase is
                // the previous one followed by its own first byte.
                Some(prev) if code == next => {
                    self.decoded
                        .extend_from_within(prev.start..prev.start + prev.len);
                    let first = self.decoded[prev.start];
                    self.decoded.push(first);
                    prev.len + 1
                }
                _ => return Err(LzwError::InvalidCode { code, next }),
            }
        };

        if let Some(prev) = self.last {
            // The previous phrase is directly followed by the current one.
            self.table.derive(prev);
            if self.table.len() >= self.dict_size {
                tracing::trace!(dict_size = self.dict_size, "decoder dictionary reset");
                self.table.clear();
            }
        }

        self.last = Some(Span { start, len });
        Ok(&self.decoded[start..])
    }

    /// Decode all symbols, appending their bytes to the decoded data.
    pub fn decode_all(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> Result<()> {
        for symbol in symbols {
            self.push(symbol)?;
        }
        Ok(())
    }

    /// The number of dictionary entries, literals included.
    pub fn dict_len(&self) -> u32 {
        self.table.len()
    }

    /// The configured dictionary capacity.
    pub fn dict_size(&self) -> u32 {
        self.dict_size
    }

    /// All data decoded so far.
    pub fn decoded(&self) -> &[u8] {
        &self.decoded
    }

    /// Take the decoded data.
    pub fn into_inner(self) -> Vec<u8> {
        self.decoded
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

/// Decompress `symbols` with a fresh default dictionary.
///
/// Fails as a whole on the first invalid code, no partial data is returned.
pub fn decompress(symbols: &[Symbol]) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new();
    decoder.decode_all(symbols.iter().copied())?;
    Ok(decoder.into_inner())
}

fn literal(code: Code) -> Option<u8> {
    if u32::from(code) < LITERALS {
        Some(code as u8)
    } else {
        None
    }
}

impl Table {
    fn len(&self) -> u32 {
        LITERALS + self.inner.len() as u32
    }

    fn next_code(&self) -> Code {
        // A table reaching 65536 entries is cleared within the same push.
        self.len().min(u32::from(Code::MAX)) as Code
    }

    fn at(&self, code: Code) -> Option<Span> {
        let idx = usize::from(code).checked_sub(LITERALS as usize)?;
        self.inner.get(idx).copied()
    }

    fn derive(&mut self, prev: Span) {
        self.inner.push(Span {
            start: prev.start,
            len: prev.len + 1,
        });
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{decompress, Decoder};
    use crate::{encode, LzwError, Symbol};

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(decompress(&[]).unwrap(), b"");
    }

    #[test]
    fn self_referential_phrase() {
        let symbols = [
            Symbol::Literal(b'f'),
            Symbol::Index(256),
            Symbol::Index(257),
            Symbol::Index(258),
            Symbol::Index(257),
        ];
        assert_eq!(decompress(&symbols).unwrap(), b"fffffffffffff");
    }

    #[test]
    fn classic_text() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT";
        let symbols = encode::compress(data);
        assert_eq!(decompress(&symbols).unwrap(), data);
    }

    #[test]
    fn unknown_code_rejected() {
        let symbols = [Symbol::Literal(b'a'), Symbol::Index(300)];
        assert_eq!(
            decompress(&symbols).unwrap_err(),
            LzwError::InvalidCode { code: 300, next: 256 }
        );
    }

    #[test]
    fn leading_index_rejected() {
        let err = decompress(&[Symbol::Index(256)]).unwrap_err();
        assert_eq!(err, LzwError::InvalidCode { code: 256, next: 256 });
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let mut decoder = Decoder::new();
        decoder.push(Symbol::Literal(b'x')).unwrap();
        assert!(decoder.push(Symbol::Index(400)).is_err());
        assert_eq!(decoder.dict_len(), 256);
        assert_eq!(decoder.push(Symbol::Index(256)).unwrap(), b"xx");
        assert_eq!(decoder.decoded(), b"xxx");
    }

    #[test]
    fn dictionary_resets_at_capacity() {
        let mut decoder = Decoder::with_dict_size(258).unwrap();
        for &byte in b"abcab" {
            decoder.push(Symbol::Literal(byte)).unwrap();
        }
        assert_eq!(decoder.dict_len(), 256);
        assert_eq!(decoder.into_inner(), b"abcab");
    }
}
