//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

/// The request methods the server understands.
///
/// Anything other than `GET` or `POST` parses to [`Method::UNKNOWN`], which no
/// route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// POST method: Submits data to be processed to the identified resource.
    POST,
    /// No recognizable method was found in the request.
    #[default]
    UNKNOWN,
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => Method::UNKNOWN,
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
