//! A module for all encoding needs.
use crate::error::Result;
use crate::{check_dict_size, Code, Symbol, DEFAULT_DICT_SIZE, LITERALS};

use std::collections::HashMap;

/// The dictionary compressor.
///
/// The encoder consumes bytes one at a time and emits a [`Symbol`] whenever the longest phrase
/// known to its dictionary can not be extended further. All state is owned by the value; two
/// encoders never share a dictionary.
///
/// ```
/// use lzwpack::{encode::Encoder, Symbol};
///
/// let mut encoder = Encoder::new();
/// let mut symbols = vec![];
/// symbols.extend(b"abab".iter().filter_map(|&b| encoder.push(b)));
/// symbols.extend(encoder.finish());
/// assert_eq!(symbols, [Symbol::Literal(b'a'), Symbol::Literal(b'b'), Symbol::Index(256)]);
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    /// The configured dictionary capacity.
    dict_size: u32,
    /// The current encoding symbol tree.
    tree: Tree,
    /// The code corresponding to the currently read characters, `None` before the first byte.
    current_code: Option<Code>,
}

/// Learned phrases, keyed by the code of their prefix and their last byte.
///
/// The 256 literal entries are implicit, every byte is its own code.
#[derive(Debug, Clone, Default)]
struct Tree {
    successors: HashMap<(Code, u8), Code>,
}

impl Encoder {
    /// An encoder with the default dictionary of 512 entries.
    pub fn new() -> Self {
        Encoder {
            dict_size: DEFAULT_DICT_SIZE,
            tree: Tree::default(),
            current_code: None,
        }
    }

    /// An encoder whose dictionary resets once it holds `dict_size` entries.
    pub fn with_dict_size(dict_size: u32) -> Result<Self> {
        Ok(Encoder::sized(check_dict_size(dict_size)?))
    }

    pub(crate) fn sized(dict_size: u32) -> Self {
        Encoder {
            dict_size,
            ..Encoder::new()
        }
    }

    /// Feed one byte, returning the symbol of the phrase it could not extend.
    pub fn push(&mut self, byte: u8) -> Option<Symbol> {
        let code = match self.current_code {
            None => {
                self.current_code = Some(Code::from(byte));
                return None;
            }
            Some(code) => code,
        };

        match self.tree.iterate(code, byte) {
            Ok(next) => {
                self.current_code = Some(next);
                None
            }
            Err(_) => {
                self.current_code = Some(Code::from(byte));
                if self.tree.len() >= self.dict_size {
                    tracing::trace!(dict_size = self.dict_size, "encoder dictionary reset");
                    self.tree.reset();
                }
                Some(Symbol::from_code(code))
            }
        }
    }

    /// Flush the pending phrase.
    ///
    /// Returns `None` if no byte was pushed since the last call. Afterwards the dictionary is
    /// back in its initial state and the encoder can be used for unrelated data.
    pub fn finish(&mut self) -> Option<Symbol> {
        self.tree.reset();
        self.current_code.take().map(Symbol::from_code)
    }

    /// Encode all of `inp` and flush, appending the symbols to `out`.
    pub fn encode_all(&mut self, inp: &[u8], out: &mut Vec<Symbol>) {
        out.extend(inp.iter().filter_map(|&byte| self.push(byte)));
        out.extend(self.finish());
    }

    /// The number of dictionary entries, literals included.
    pub fn dict_len(&self) -> u32 {
        self.tree.len()
    }

    /// The configured dictionary capacity.
    pub fn dict_size(&self) -> u32 {
        self.dict_size
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

/// Compress `data` with a fresh default dictionary.
pub fn compress(data: &[u8]) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(data.len() / 2);
    Encoder::new().encode_all(data, &mut out);
    out
}

impl Tree {
    fn len(&self) -> u32 {
        LITERALS + self.successors.len() as u32
    }

    fn reset(&mut self) {
        self.successors.clear();
    }

    fn at_key(&self, code: Code, ch: u8) -> Option<Code> {
        self.successors.get(&(code, ch)).copied()
    }

    /// Iterate to the next char.
    /// Return Ok when it was already in the tree or creates a new entry for it and returns Err.
    fn iterate(&mut self, code: Code, ch: u8) -> core::result::Result<Code, Code> {
        if let Some(next) = self.at_key(code, ch) {
            Ok(next)
        } else {
            Err(self.append(code, ch))
        }
    }

    fn append(&mut self, code: Code, ch: u8) -> Code {
        let next = self.len() as Code;
        debug_assert!(self.at_key(code, ch).is_none());
        self.successors.insert((code, ch), next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::{compress, Encoder};
    use crate::{LzwError, Symbol};

    #[test]
    fn empty_input_emits_nothing() {
        assert!(compress(b"").is_empty());
        assert_eq!(Encoder::new().finish(), None);
    }

    #[test]
    fn runs_of_one_byte_grow_phrases() {
        let symbols = compress(b"fffffffffffff");
        assert_eq!(
            symbols,
            [
                Symbol::Literal(b'f'),
                Symbol::Index(256),
                Symbol::Index(257),
                Symbol::Index(258),
                Symbol::Index(257),
            ]
        );
    }

    #[test]
    fn classic_text() {
        let symbols: Vec<_> = compress(b"TOBEORNOTTOBEORTOBEORNOT")
            .into_iter()
            .map(Symbol::code)
            .collect();
        let expected = [
            84, 79, 66, 69, 79, 82, 78, 79, 84, 256, 258, 260, 265, 259, 261, 263,
        ];
        assert_eq!(symbols, expected);
    }

    #[test]
    fn dictionary_resets_at_capacity() {
        let mut encoder = Encoder::with_dict_size(258).unwrap();
        // Each new pair of distinct bytes learns a phrase.
        assert_eq!(encoder.push(b'a'), None);
        assert_eq!(encoder.push(b'b'), Some(Symbol::Literal(b'a')));
        assert_eq!(encoder.dict_len(), 257);
        assert_eq!(encoder.push(b'c'), Some(Symbol::Literal(b'b')));
        // Learning `bc` filled the dictionary, so `ab` is forgotten again.
        assert_eq!(encoder.dict_len(), 256);
        assert_eq!(encoder.push(b'a'), Some(Symbol::Literal(b'c')));
        assert_eq!(encoder.push(b'b'), Some(Symbol::Literal(b'a')));
        assert_eq!(encoder.finish(), Some(Symbol::Literal(b'b')));
    }

    #[test]
    fn invalid_dictionary_size_rejected() {
        assert_eq!(
            Encoder::with_dict_size(256).unwrap_err(),
            LzwError::InvalidDictSize(256)
        );
        assert!(Encoder::with_dict_size(1 << 17).is_err());
    }
}
