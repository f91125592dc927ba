//! HTTP API for the todo store.

mod error;
mod handlers;
pub mod routes;
mod state;
pub mod validators;

#[cfg(test)]
mod routes_test;
#[cfg(test)]
mod validators_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Port used when neither the CLI nor the environment chooses one.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "TODO_API_PORT";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// Serve the OpenAPI reference at /docs
    pub enable_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            verbosity: 0,
            enable_docs: false,
        }
    }
}

impl Config {
    /// Defaults, with the port taken from `TODO_API_PORT` when it parses.
    pub fn new() -> Self {
        let port = std::env::var(PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self {
            port,
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_docs(mut self, enable_docs: bool) -> Self {
        self.enable_docs = enable_docs;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Default filter directive for a verbosity level.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "todo_agenda=info,todo_api=info,tower_http=info",
        1 => "todo_agenda=debug,todo_api=debug,tower_http=debug",
        _ => "todo_agenda=trace,todo_api=trace,tower_http=trace,sqlx=debug",
    }
}

/// Initialize tracing subscriber with env filter.
///
/// `RUST_LOG` wins over the verbosity level.
pub fn init_tracing(verbosity: u8) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Serve the API until Ctrl-C or SIGTERM, then close the database.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    let state = AppState::new(db);
    let app =
        routes::create_router(state.clone(), config.enable_docs).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server Running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db().close().await;
    info!("Database connection closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
