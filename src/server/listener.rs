use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::files::{StaticFileReader, StaticResponder};
use crate::http::connection::{Connection, ConnectionError, ConnectionSettings};

/// Pause after a failed accept so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Prepares the document root and 404 page, binds, and serves forever.
///
/// Every error returned from here is fatal for the process.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let static_cfg = &cfg.static_files;

    let reader = StaticFileReader::open(&static_cfg.root, static_cfg.max_file_bytes)
        .await
        .with_context(|| format!("opening document root {}", static_cfg.root.display()))?;
    let responder = StaticResponder::new(reader, &static_cfg.not_found_page).await?;
    info!("Serving files from {}", responder.reader().root().display());

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(
        listener,
        Arc::new(responder),
        cfg.server.connection_settings(),
        cfg.server.max_connections,
    )
    .await
}

/// Accept loop: one task per connection, at most `max_connections` at once.
///
/// A permit is taken before `accept`, so excess clients queue in the OS
/// backlog instead of spawning more tasks.
pub async fn serve(
    listener: TcpListener,
    responder: Arc<StaticResponder>,
    settings: ConnectionSettings,
    max_connections: usize,
) -> anyhow::Result<()> {
    let permits = Arc::new(Semaphore::new(max_connections.max(1)));

    loop {
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .context("connection limiter closed")?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                let err = ConnectionError::AcceptFailed(e);
                tracing::error!(error = %err, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let responder = responder.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let mut conn = Connection::new(socket, responder, settings);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
