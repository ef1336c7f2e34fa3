//! HTTP parser module.
//!
//! This module turns the raw bytes of a connection into a best-effort request,
//! or reports that nothing usable arrived.

mod request;
mod method;
mod error;
mod tests;

// Re-export public items
pub use request::{HttpRequest, ParseOutcome};
pub use method::Method;
pub use error::Error;

// Re-export the parsing functions
pub use request::{parse_request, read_request};
