//! The `sikho serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use sikho_core::validate_catalog;
use sikho_server::Server;

pub async fn execute(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = sikho_server::load_config_from(config_path.as_deref())?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let catalog = super::load_catalog(&config.data_dir)?;
    for w in validate_catalog(&catalog) {
        match &w.subject {
            Some(subject) => tracing::warn!("[{subject}] {}", w.message),
            None => tracing::warn!("{}", w.message),
        }
    }

    let server = Server::bind(&config, Arc::new(catalog)).await?;
    println!("sikho listening on http://{}", server.local_addr()?);

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
}
