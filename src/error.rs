use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// A raw line that could not be turned into a [`Message`](crate::Message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty message")]
    Empty,

    #[error("missing command in {0:?}")]
    MissingCommand(String),
}

/// Establishing the connection failed. Refused, unreachable and timed out
/// connections all end up here.
#[derive(Error, Debug)]
#[error("failed to connect to {address}: {source}")]
pub struct ConnectionError {
    pub address: String,
    #[source]
    pub source: io::Error,
}

/// Writing or flushing a serialized line failed.
#[derive(Error, Debug)]
#[error("failed to write message: {0}")]
pub struct WriteError(#[from] pub io::Error);

#[derive(Error, Debug)]
pub enum ReadError {
    /// The peer sent a complete line that does not parse.
    #[error("malformed message {line:?}: {source}")]
    Malformed {
        line: String,
        #[source]
        source: ParseError,
    },

    #[error("message is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
