//! HTTP request handlers and routing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, error, warn};
use regex::Regex;

use crate::parser::{Error as ParserError, HttpRequest, Method, ParseOutcome};
use crate::server::endpoints;
use crate::server::{Error, HttpResponse, StatusCode};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Represents a route in the HTTP server.
pub struct Route {
    /// The pattern the request URI must match.
    pub pattern: Regex,
    /// The HTTP method to match.
    pub method: Method,
    /// The handler function.
    pub handler: HandlerFn,
}

impl Route {
    /// Check whether this route accepts the request.
    pub fn matches(&self, request: &HttpRequest) -> bool {
        self.method == request.method && self.pattern.is_match(&request.uri)
    }
}

/// An ordered route table.
///
/// Routes are tried in registration order and the first one whose method and
/// pattern both match handles the request. Later routes are never consulted,
/// so specific patterns must be added before catch-alls.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route to the table.
    ///
    /// # Arguments
    ///
    /// * `pattern` - A regular expression searched for anywhere in the URI
    /// * `method` - The method the route accepts
    /// * `handler` - The async function producing the response
    ///
    /// # Returns
    ///
    /// An error if `pattern` is not a valid regular expression
    pub fn add_route<F, Fut>(&mut self, pattern: &str, method: Method, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let pattern = Regex::new(pattern)?;
        let handler = Arc::new(move |req: HttpRequest| -> HandlerFuture {
            Box::pin(handler(req))
        });

        self.routes.push(Route {
            pattern,
            method,
            handler,
        });

        Ok(())
    }

    /// The registered routes, in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Produce the response for whatever was read off a connection.
    ///
    /// A connection that sent nothing gets a 404 and one whose read failed gets
    /// a 500; a parsed request goes through [`Router::route`].
    pub async fn dispatch(&self, outcome: ParseOutcome) -> HttpResponse {
        match outcome {
            ParseOutcome::Parsed(request) => self.route(request).await,
            ParseOutcome::Malformed(ParserError::EmptyRequest) => {
                debug!("Connection closed before sending a request");
                endpoints::not_found()
            }
            ParseOutcome::Malformed(e) => {
                warn!("Failed to read request: {e}");
                HttpResponse::new(StatusCode::InternalServerError)
            }
        }
    }

    /// Invoke the first matching route, or fall back to 404.
    pub async fn route(&self, request: HttpRequest) -> HttpResponse {
        let Some(route) = self.routes.iter().find(|route| route.matches(&request)) else {
            debug!("No route for {method} {uri}", method = request.method, uri = request.uri);
            return endpoints::not_found();
        };

        let target = format!("{} {}", request.method, request.uri);
        match (route.handler)(request).await {
            Ok(response) => {
                debug!("{target} -> {status}", status = response.status.as_u16());
                response
            }
            Err(e) => {
                error!("Handler for {target} failed: {e}");
                HttpResponse::new(StatusCode::InternalServerError)
            }
        }
    }
}
