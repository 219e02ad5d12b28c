use log::{error, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::{AppState, build_router};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::server::shutdown::shutdown_signal;
use crate::storage::{AccountStore, SqliteAccountStore};

pub struct Server {
    store: Arc<dyn AccountStore>,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Opens the configured account store and binds the listener.
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = SqliteAccountStore::open(&config.database_url).map_err(|e| {
            error!("Failed to open account store {}: {}", config.database_url, e);
            e
        })?;

        Self::with_store(config, Arc::new(store)).await
    }

    /// Binds the listener around an already constructed store.
    pub async fn with_store(
        config: ServerConfig,
        store: Arc<dyn AccountStore>,
    ) -> Result<Self, ServerError> {
        let socket = config.listen_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", listener.local_addr()?);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e.into());
            }
        };

        Ok(Self {
            store,
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn start(self) -> Result<(), ServerError> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests and
    /// releases the account store.
    pub async fn start_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(
            "Starting devlock server on {} ({:?} mode)",
            addr, self.config.environment
        );

        let state = AppState::new(self.store, self.config.environment);
        let app = build_router(state, self.config.max_body_bytes);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        info!("Server on {} stopped; account store released", addr);
        Ok(())
    }
}
