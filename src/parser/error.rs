//! Error types for the HTTP parser.

use thiserror::Error;

/// Reasons a request could not be read off a connection.
///
/// Parsing itself is best-effort and never fails once bytes were received;
/// these variants only describe a connection that produced nothing usable.
#[derive(Debug, Error)]
pub enum Error {
    /// The peer closed the connection before sending any bytes.
    #[error("Empty request")]
    EmptyRequest,

    /// Reading from the connection failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}
