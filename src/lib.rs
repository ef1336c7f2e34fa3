//! A minimal HTTP/1.1 server built directly on TCP.
//!
//! Requests are parsed by hand, matched against an ordered table of
//! regular-expression routes, and answered by small async handlers. One task
//! is spawned per connection; each connection carries exactly one request.
//!
//! # Features
//!
//! - Best-effort, line based request parsing (`GET`/`POST`, `User-Agent`, one body line)
//! - First-match-wins routing over `(pattern, method, handler)` bindings
//! - Built-in endpoints: `/`, `/echo/<text>`, `/user-agent`, `GET`/`POST /files/<name>`
//! - Graceful shutdown on Ctrl+C
//!
//! # Examples
//!
//! ## Parsing
//!
//! ```
//! use microserve_rs::{parse_request, Method};
//!
//! let request = parse_request(b"GET /echo/hi HTTP/1.1\r\nUser-Agent: curl/8.0\r\n\r\n");
//!
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.uri, "/echo/hi");
//! assert_eq!(request.user_agent.as_deref(), Some("curl/8.0"));
//! ```
//!
//! ## Custom routes
//!
//! ```no_run
//! use microserve_rs::{HttpResponse, HttpServer, Method, Router, ServerConfig, StatusCode};
//!
//! # async fn run() -> Result<(), microserve_rs::ServerError> {
//! let mut router = Router::new();
//! router.add_route("^/health$", Method::GET, |_req| async {
//!     Ok(HttpResponse::new(StatusCode::Ok).with_body_string("up"))
//! })?;
//!
//! HttpServer::new(ServerConfig::default(), router).start().await
//! # }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, ParseOutcome, parse_request, read_request};
pub use server::{Error as ServerError, HttpResponse, HttpServer, Router, ServerConfig, StatusCode};
