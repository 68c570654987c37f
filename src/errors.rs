use std::io;

/// `remove_min` was called on an empty [`PriorityDeque`].
///
/// Tree construction never does this on well-formed input, so seeing it means
/// an invariant was broken somewhere upstream.
///
/// [`PriorityDeque`]: crate::collections::PriorityDeque
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("remove_min called on an empty priority deque")]
pub struct EmptyDequeError;

/// An error from building a code, or from encoding/decoding with one.
///
/// Lookups of unknown symbols or codewords are not errors; those return an
/// empty value instead.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// The input stream could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("tree construction failed: {0}")]
    EmptyDeque(#[from] EmptyDequeError),

    /// Asked to encode a byte the code was not generated from.
    #[error("symbol {0:#04x} has no codeword")]
    UnknownSymbol(u8),

    /// Encoded input may only contain '0' and '1'.
    #[error("invalid bit {found:?} at offset {offset}")]
    InvalidBit { found: char, offset: usize },

    /// The bits starting at `offset` are not a prefix of any codeword.
    ///
    /// Only possible when the code has a single symbol.
    #[error("bits at offset {offset} match no codeword")]
    UnknownCodeword { offset: usize },

    /// The bit string ran out partway through a codeword.
    #[error("bit string ends inside a codeword ({pending} trailing bits)")]
    IncompleteCodeword { pending: usize },

    /// There are bits to decode but the code has no symbols.
    #[error("cannot decode with an empty code")]
    NoCode,
}

impl From<HuffmanError> for io::Error {
    fn from(e: HuffmanError) -> Self {
        match e {
            HuffmanError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_kind() {
        let err = HuffmanError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        let io_err = io::Error::from(err);
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(io_err.to_string(), "gone");
    }

    #[test]
    fn other_errors_are_invalid_data() {
        let io_err = io::Error::from(HuffmanError::NoCode);
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(io_err.to_string(), "cannot decode with an empty code");

        let io_err = io::Error::from(HuffmanError::UnknownSymbol(b'z'));
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(io_err.to_string(), "symbol 0x7a has no codeword");
    }

    #[test]
    fn empty_deque_converts() {
        let err = HuffmanError::from(EmptyDequeError);
        assert_eq!(
            err.to_string(),
            "tree construction failed: remove_min called on an empty priority deque"
        );
    }
}
