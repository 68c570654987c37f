mod decoder;
mod frequency;
mod huffmanencoding;
pub mod tree;

use std::io::Read;

use tracing::{debug, trace};

pub use self::decoder::Decoder;
pub use self::frequency::FrequencyTable;
use self::huffmanencoding::{CodeTrie, HuffmanEncoding};
use self::tree::{CodedLeaf, Node};
use crate::{
    collections::{AssociativeMap, PriorityDeque},
    errors::{HuffmanError, Result},
};

/// A Huffman code derived from one input, plus what it needs to encode,
/// decode and report sizes.
///
/// Immutable once generated. Codes are optimal but not canonical: symbols with
/// equal counts may swap codewords between runs.
#[derive(Debug, Clone)]
pub struct HuffmanCode {
    root: Option<Node>,
    leaves: AssociativeMap<u8, CodedLeaf>,
    trie: CodeTrie,
    original_size: usize,
    encoded_bits: u64,
}

impl HuffmanCode {
    /// Read `input` to the end and build a code for its bytes.
    pub fn generate(input: impl Read) -> Result<Self> {
        let frequencies = FrequencyTable::count(input)?;
        Self::from_frequencies(frequencies)
    }

    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        Self::generate(input)
    }

    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let original_size = frequencies.total();
        let (weights, symbols) = frequencies.into_sorted();

        let queue = PriorityDeque::with_capacity(weights.len());
        let root = tree::build(&weights, &symbols, queue)?;
        let coded = root.as_ref().map(tree::assign_codes).unwrap_or_default();

        let mut leaves = AssociativeMap::with_capacity(coded.len());
        let mut trie = CodeTrie::new();
        let mut encoded_bits = 0;
        for leaf in coded {
            trace!(symbol = leaf.symbol, weight = leaf.weight, code = %leaf.code);
            trie.add_code(&leaf.code, leaf.symbol);
            encoded_bits += leaf.weight * leaf.code.len() as u64;
            leaves.put(leaf.symbol, leaf);
        }

        debug!(
            original_size,
            alphabet = leaves.len(),
            encoded_bits,
            "generated huffman code"
        );

        Ok(Self {
            root,
            leaves,
            trie,
            original_size,
            encoded_bits,
        })
    }

    /// The codeword for `symbol`, or `""` if the input never contained it.
    pub fn codeword(&self, symbol: u8) -> &str {
        match self.leaves.get(&symbol) {
            Some(leaf) => &leaf.code,
            None => "",
        }
    }

    /// The symbol whose codeword is exactly `codeword`.
    pub fn symbol(&self, codeword: &str) -> Option<u8> {
        self.trie.lookup(codeword)
    }

    /// Concatenate the codewords of `input`, in order.
    ///
    /// Fails on a byte the code was not built from.
    pub fn encode(&self, input: &[u8]) -> Result<String> {
        let mut bits = String::with_capacity(input.len() * 4);
        for &symbol in input {
            let leaf = self
                .leaves
                .get(&symbol)
                .ok_or(HuffmanError::UnknownSymbol(symbol))?;
            bits.push_str(&leaf.code);
        }
        Ok(bits)
    }

    pub fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        self.decoder(bits).collect()
    }

    pub fn decoder<'a>(&'a self, bits: &'a str) -> Decoder<'a> {
        Decoder::new(&self.trie, bits)
    }

    /// Number of bytes the code was generated from.
    pub fn original_size(&self) -> usize {
        self.original_size
    }

    /// Encoded length of the original input in whole bytes, rounded down.
    ///
    /// The padding a byte-aligned stream would need is not counted, so this
    /// can be one byte short of a real packed size.
    pub fn compressed_size(&self) -> usize {
        (self.encoded_bits / 8) as usize
    }

    /// Exact bit length of the encoded original input.
    pub fn encoded_bits(&self) -> u64 {
        self.encoded_bits
    }

    /// Number of distinct symbols.
    pub fn alphabet_size(&self) -> usize {
        self.leaves.len()
    }

    /// How often `symbol` appeared in the input.
    pub fn frequency(&self, symbol: u8) -> u64 {
        self.leaves.get(&symbol).map_or(0, |leaf| leaf.weight)
    }

    /// `(symbol, codeword)` pairs, in no particular order.
    pub fn codewords(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.leaves
            .values()
            .map(|leaf| (leaf.symbol, leaf.code.as_str()))
    }

    pub fn tree(&self) -> Option<&Node> {
        self.root.as_ref()
    }
}

/// Operations of a prefix code that is regenerated for each input.
pub trait PrefixCode {
    /// Replace the current code with one built from `input`.
    ///
    /// The current code is discarded first, so on error no code is left.
    fn generate_code<R: Read>(&mut self, input: R) -> Result<()>;

    fn get_codeword(&self, ch: u8) -> &str;

    /// `None` when no symbol has exactly this codeword.
    fn get_char(&self, codeword: &str) -> Option<u8>;

    /// Generate a code from `text`, then encode `text` with it.
    fn encode(&mut self, text: &str) -> Result<String>;

    fn decode(&self, bits: &str) -> Result<Vec<u8>>;

    fn original_size(&self) -> usize;

    fn compressed_size(&self) -> usize;
}

/// Stateful wrapper around [`HuffmanCode`].
///
/// Before the first `generate_code`/`encode` every lookup answers with an
/// empty value: `""`, `None`, `0`, or no decoded bytes.
#[derive(Debug, Clone, Default)]
pub struct Huffman {
    code: Option<HuffmanCode>,
}

impl Huffman {
    pub fn new() -> Self {
        Self::default()
    }

    /// The code from the latest `generate_code`/`encode`, if any.
    pub fn code(&self) -> Option<&HuffmanCode> {
        self.code.as_ref()
    }
}

impl PrefixCode for Huffman {
    fn generate_code<R: Read>(&mut self, input: R) -> Result<()> {
        self.code = None;
        self.code = Some(HuffmanCode::generate(input)?);
        Ok(())
    }

    fn get_codeword(&self, ch: u8) -> &str {
        self.code.as_ref().map_or("", |code| code.codeword(ch))
    }

    fn get_char(&self, codeword: &str) -> Option<u8> {
        self.code.as_ref()?.symbol(codeword)
    }

    fn encode(&mut self, text: &str) -> Result<String> {
        let code = HuffmanCode::from_bytes(text.as_bytes())?;
        let bits = code.encode(text.as_bytes())?;
        self.code = Some(code);
        Ok(bits)
    }

    fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        match &self.code {
            Some(code) => code.decode(bits),
            None => Ok(Vec::new()),
        }
    }

    fn original_size(&self) -> usize {
        self.code.as_ref().map_or(0, HuffmanCode::original_size)
    }

    fn compressed_size(&self) -> usize {
        self.code.as_ref().map_or(0, HuffmanCode::compressed_size)
    }
}
