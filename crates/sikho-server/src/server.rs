//! Accept loop and per-connection handling.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use sikho_core::Catalog;

use crate::config::ServerConfig;
use crate::http::{read_request, HttpError, Response};
use crate::router::Router;

/// A bound server, ready to accept connections.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    max_body_bytes: usize,
}

impl Server {
    /// Bind the configured address. Datasets must already be loaded.
    pub async fn bind(config: &ServerConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        let router = Router::new(catalog, config);
        info!(
            addr = %listener.local_addr()?,
            definitions = router.catalog().definitions().len(),
            analogies = router.catalog().analogies().len(),
            dialects = router.catalog().dialects().templates.len(),
            "server bound"
        );

        Ok(Self {
            listener,
            router: Arc::new(router),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// The address actually bound (useful when the port was 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process is killed.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` completes. In-flight connections are left to
    /// finish on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let router = Arc::clone(&self.router);
                        let max_body_bytes = self.max_body_bytes;
                        let span = tracing::debug_span!("request", id = %Uuid::new_v4(), %peer);
                        tokio::spawn(
                            async move {
                                if let Err(e) = handle_connection(stream, &router, max_body_bytes).await {
                                    warn!("connection error: {e}");
                                }
                            }
                            .instrument(span),
                        );
                    }
                    Err(e) => warn!("accept failed: {e}"),
                },
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    router: &Router,
    max_body_bytes: usize,
) -> Result<(), HttpError> {
    let start = Instant::now();
    let (read_half, mut write_half) = stream.split();
    let mut reader = BufReader::new(read_half);

    let response = match read_request(&mut reader, max_body_bytes).await {
        Ok(request) => {
            let response = router.handle(&request);
            debug!(
                method = %request.method,
                path = %request.path(),
                status = response.status,
                elapsed_us = start.elapsed().as_micros() as u64,
                "handled"
            );
            response
        }
        Err(HttpError::ConnectionClosed) => return Ok(()),
        Err(HttpError::Io(e)) => return Err(HttpError::Io(e)),
        Err(e @ HttpError::BodyTooLarge { .. }) => {
            debug!("{e}");
            Response::error(413, "Request body too large")
        }
        Err(e) => {
            debug!("{e}");
            Response::error(400, "Bad request")
        }
    };

    write_half.write_all(&response.to_bytes()).await?;
    write_half.flush().await?;
    write_half.shutdown().await?;
    Ok(())
}
