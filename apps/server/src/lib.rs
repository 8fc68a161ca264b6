//! # Shiok Server
//!
//! The HTTP host of the Singapore daily word game, built on `Axum` with `OpenAPI` docs.
//!
//! ## Example
//! ```no_run
//! use shiok_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;
pub mod runtime;

pub use router::init as build_router;

use anyhow::{Context, Result, anyhow};
use axum_server::Handle;
use shiok::domain::config::ApiConfig;
use shiok::kernel::server::ApiState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// Environment variable consulted when `upstream.api_key` is not configured.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates TLS material when `server.ssl` is set
    /// 2. Falls back to `PERPLEXITY_API_KEY` when no upstream key is configured
    /// 3. Initializes every feature slice
    /// 4. Constructs application state
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * No upstream key is available and missing credentials are not allowed
    pub fn build(mut self) -> Result<Server> {
        self.validate_ssl_config()?;
        resolve_api_key(&mut self.cfg, std::env::var(API_KEY_ENV).ok());

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, features = ?shiok::features::ENABLED, "Initializing server");

        let slices =
            shiok::init(&self.cfg).map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let state = slices
            .into_iter()
            .fold(ApiState::builder().config(self.cfg), |builder, slice| {
                builder.register_slice(slice)
            })
            .build()
            .context("Failed to finalize API state registry")?;
        Ok(Server { state })
    }
}

/// Fills `upstream.api_key` from `fallback` when the configured key is absent or blank.
pub fn resolve_api_key(cfg: &mut ApiConfig, fallback: Option<String>) {
    let configured = cfg.upstream.api_key.as_deref().is_some_and(|key| !key.trim().is_empty());
    if configured {
        return;
    }
    if let Some(key) = fallback.filter(|key| !key.trim().is_empty()) {
        info!("Using upstream API key from {API_KEY_ENV}");
        cfg.upstream.api_key = Some(key);
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(address = %address, ssl = cfg.server.ssl.is_some(), "Starting server");

        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Waits for Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiok::domain::config::SslConfig;

    fn config_with_key(key: Option<&str>) -> ApiConfig {
        let mut cfg = ApiConfig::default();
        cfg.upstream.api_key = key.map(str::to_owned);
        cfg
    }

    #[test]
    fn configured_key_wins_over_environment() {
        let mut cfg = config_with_key(Some("from-file"));
        resolve_api_key(&mut cfg, Some("from-env".to_owned()));
        assert_eq!(cfg.upstream.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn environment_fills_missing_or_blank_key() {
        let mut cfg = config_with_key(None);
        resolve_api_key(&mut cfg, Some("from-env".to_owned()));
        assert_eq!(cfg.upstream.api_key.as_deref(), Some("from-env"));

        let mut cfg = config_with_key(Some("  "));
        resolve_api_key(&mut cfg, Some("from-env".to_owned()));
        assert_eq!(cfg.upstream.api_key.as_deref(), Some("from-env"));

        let mut cfg = config_with_key(None);
        resolve_api_key(&mut cfg, Some(String::new()));
        assert!(cfg.upstream.api_key.is_none());
    }

    #[test]
    fn build_registers_daily_word_slice() {
        let mut cfg = config_with_key(Some("pplx-test"));
        cfg.server.port = 0;

        let server = Server::builder().config(cfg).build().unwrap();

        let names: Vec<_> = server.state().slice_names().collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with("DailyWord"));
    }

    #[test]
    fn build_rejects_missing_tls_material() {
        let mut cfg = config_with_key(Some("pplx-test"));
        cfg.server.ssl = Some(SslConfig {
            cert: "/nonexistent/cert.pem".into(),
            key: "/nonexistent/key.pem".into(),
        });

        let err = Server::builder().config(cfg).build().unwrap_err();
        assert!(err.to_string().contains("SSL certificate not found"));
    }
}
