use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, encoding, decoding or persisting.
#[derive(Debug, Error)]
pub enum Error {
    /// There are no symbols to build a tree from, or to measure a ratio against.
    #[error("empty input: no symbols to build a tree from")]
    EmptyInput,

    /// Encoding hit a symbol that the code table does not cover.
    #[error("symbol {symbol} at position {position} is not in the code table")]
    UnknownSymbol {
        /// Debug rendering of the offending symbol.
        symbol: String,
        /// Index of the symbol in the encoded input.
        position: usize,
    },

    /// The bit stream is not a concatenation of codes of the tree.
    #[error("malformed bit stream at position {position}: {reason}")]
    MalformedStream {
        /// Offset into the stream where decoding failed.
        position: usize,
        /// What exactly went wrong.
        reason: StreamFault,
    },

    /// A persisted container could not be understood.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// Reading or writing a container failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason attached to [`Error::MalformedStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamFault {
    /// The stream ended in the middle of a code.
    #[error("stream ends inside the code starting at bit {codeword_start}")]
    Truncated {
        /// Where the unfinished code began.
        codeword_start: usize,
    },
    /// The path asks for a child the current node does not have.
    #[error("no child to follow from a leaf")]
    NoChild,
    /// The textual stream holds something other than '0' or '1'.
    #[error("invalid binary digit {0:?}")]
    InvalidDigit(char),
}

impl Error {
    pub(crate) fn malformed(position: usize, reason: StreamFault) -> Self {
        Error::MalformedStream { position, reason }
    }

    pub(crate) fn container(message: impl Into<String>) -> Self {
        Error::InvalidContainer(message.into())
    }
}
