//! Huffman coding over bytes, on top of hand-built containers.
//!
//! Codewords are strings of `'0'` and `'1'`; nothing is packed into bits.
//!
//! ```
//! let (code, bits) = huffman::encode(b"abracadabra")?;
//! assert_eq!(code.decode(&bits)?, b"abracadabra");
//! # Ok::<(), huffman::HuffmanError>(())
//! ```

pub mod collections;
mod errors;
pub mod huffman;

pub use crate::errors::{EmptyDequeError, HuffmanError, Result};
pub use crate::huffman::{Decoder, FrequencyTable, Huffman, HuffmanCode, PrefixCode};

/// Build a code from `input` and encode `input` with it.
pub fn encode(input: &[u8]) -> Result<(HuffmanCode, String)> {
    let code = HuffmanCode::from_bytes(input)?;
    let bits = code.encode(input)?;
    Ok((code, bits))
}
