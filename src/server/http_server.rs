//! HTTP server implementation.

use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, info, error};

use crate::parser::read_request;
use crate::server::config::ServerConfig;
use crate::server::endpoints::default_router;
use crate::server::error::Error;
use crate::server::handler::Router;

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The route table, shared read-only with every connection task.
    router: Arc<Router>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and routes.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Create a server serving the built-in endpoints.
    pub fn with_default_routes(config: ServerConfig) -> Result<Self, Error> {
        let router = default_router(&config)?;
        Ok(Self::new(config, router))
    }

    /// The route table.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Log the directory root and registered endpoints.
    fn display_server_info(&self) {
        info!("Serving files from {dir}", dir = self.config.directory.display());
        info!("Registered endpoints:");
        for route in self.router.routes() {
            info!("  {method} {pattern}", method = route.method, pattern = route.pattern);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Handle connection errors.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");

        // Wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        // Wait for all tasks to complete (with timeout)
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Bind the configured address and serve until Ctrl+C.
    ///
    /// Fails only if the address cannot be bound.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;
        self.run(listener).await
    }

    /// Serve connections from an already bound listener until Ctrl+C.
    ///
    /// Every accepted connection is handled in its own task; there is no limit
    /// on how many run at once.
    pub async fn run(&self, listener: TcpListener) -> Result<(), Error> {
        let shutdown = async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        self.run_until(listener, shutdown).await
    }

    /// Serve connections until `shutdown` resolves.
    ///
    /// The listener is closed as soon as `shutdown` completes. Connections
    /// already accepted get up to 30 seconds to finish before this returns.
    pub async fn run_until(&self, listener: TcpListener, shutdown: impl Future<Output = ()>) -> Result<(), Error> {
        self.display_server_info();

        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                // Check for shutdown signal
                () = &mut shutdown => {
                    info!("Shutting down server...");
                    break;
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((mut socket, addr)) => {
                            debug!("Accepted connection from {addr}");
                            let router = Arc::clone(&self.router);
                            let read_buffer_size = self.config.read_buffer_size;

                            tasks.spawn(async move {
                                if let Err(e) = Self::handle_connection(&mut socket, &router, read_buffer_size).await {
                                    error!("Error handling connection from {addr}: {e}");
                                }
                            });
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }

                // Reap finished connections
                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = res {
                        error!("Connection task failed: {e}");
                    }
                }
            }
        }

        drop(listener);
        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Handle a single connection: read one request, answer it, close.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let outcome = read_request(socket, read_buffer_size).await;
        let response = router.dispatch(outcome).await;

        socket.write_all(&response.to_bytes()).await?;
        socket.shutdown().await?;

        Ok(())
    }
}
