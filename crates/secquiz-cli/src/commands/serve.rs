//! The `secquiz serve` command.

use std::path::PathBuf;

use anyhow::Result;

use secquiz_server::config::load_config_from;

pub async fn execute(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    tracing::debug!(config = ?config, "resolved server configuration");
    secquiz_server::run(config).await
}
