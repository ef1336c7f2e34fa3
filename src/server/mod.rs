//! HTTP server implementation for microserve-rs.
//!
//! This module provides the route table, the built-in endpoints and the
//! connection driver that ties them to the parser.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
pub mod endpoints;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{HandlerFn, HandlerFuture, Route, Router};
pub use http_server::HttpServer;
