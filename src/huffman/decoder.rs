use std::str::CharIndices;

use super::huffmanencoding::CodeTrie;
use crate::errors::{HuffmanError, Result};

/// Lazily decodes a string of '0'/'1' characters, one symbol at a time.
///
/// Implements `Iterator`. After the first error it yields nothing more.
pub struct Decoder<'a> {
    trie: &'a CodeTrie,
    bits: CharIndices<'a>,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(trie: &'a CodeTrie, bits: &'a str) -> Self {
        Self {
            trie,
            bits: bits.char_indices(),
            failed: false,
        }
    }

    /// Decode the next symbol, or `None` once the input is used up exactly.
    pub fn next_symbol(&mut self) -> Result<Option<u8>> {
        let mut node = CodeTrie::ROOT;
        let mut pending = 0;
        let mut first = None;

        for (offset, c) in self.bits.by_ref() {
            let start = *first.get_or_insert(offset);
            let bit = match c {
                '0' => 0,
                '1' => 1,
                found => return Err(HuffmanError::InvalidBit { found, offset }),
            };
            pending += 1;

            node = match self.trie.step(node, bit) {
                Some(next) => next,
                None if self.trie.is_empty() => return Err(HuffmanError::NoCode),
                None => return Err(HuffmanError::UnknownCodeword { offset: start }),
            };

            if let Some(symbol) = self.trie.symbol_at(node) {
                return Ok(Some(symbol));
            }
        }

        if pending == 0 {
            Ok(None)
        } else {
            Err(HuffmanError::IncompleteCodeword { pending })
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.next_symbol().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::huffmanencoding::HuffmanEncoding;

    fn trie(codes: &[(&str, u8)]) -> CodeTrie {
        let mut trie = CodeTrie::new();
        for &(code, symbol) in codes {
            trie.add_code(code, symbol);
        }
        trie
    }

    fn decode_all(trie: &CodeTrie, bits: &str) -> Result<Vec<u8>> {
        Decoder::new(trie, bits).collect()
    }

    #[test]
    fn decodes_symbols_in_order() -> anyhow::Result<()> {
        let trie = trie(&[("0", b'a'), ("10", b'b'), ("11", b'c')]);
        assert_eq!(decode_all(&trie, "0101100")?, b"abcaa");
        Ok(())
    }

    #[test]
    fn empty_input_is_empty_output() {
        let trie = trie(&[("0", b'a'), ("1", b'b')]);
        assert_eq!(Decoder::new(&trie, "").count(), 0);
    }

    #[test]
    fn trailing_partial_codeword() {
        let trie = trie(&[("0", b'a'), ("10", b'b'), ("11", b'c')]);
        let mut decoder = Decoder::new(&trie, "01");
        assert_eq!(decoder.next().transpose().unwrap(), Some(b'a'));

        let err = decoder.next().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "bit string ends inside a codeword (1 trailing bits)"
        );
        assert!(decoder.next().is_none());
    }

    #[test]
    fn rejects_non_binary() {
        let trie = trie(&[("0", b'a'), ("1", b'b')]);
        let err = decode_all(&trie, "01x").unwrap_err();
        assert_eq!(err.to_string(), "invalid bit 'x' at offset 2");
    }

    #[test]
    fn unassigned_path() {
        let trie = trie(&[("0", b'a')]);
        let err = decode_all(&trie, "001").unwrap_err();
        assert_eq!(err.to_string(), "bits at offset 2 match no codeword");
    }

    #[test]
    fn nothing_to_decode_with() {
        let trie = CodeTrie::new();
        let err = decode_all(&trie, "0").unwrap_err();
        assert!(matches!(err, HuffmanError::NoCode));
    }
}
