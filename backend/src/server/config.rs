//! HTTP server configuration objects and helpers.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::settings::{PedidosSettings, SettingsError, UsuariosSettings, normalise_base_path};
use crate::domain::UserOrdersService;
use crate::domain::ports::{RecordStore, UserOrdersQuery};
use crate::outbound::seed::SeedRecordStore;
use crate::outbound::usuarios::HttpUserDirectory;

const DIRECTORY_BASE_PATH: &str = "/api";

/// Builder-style configuration for the user directory server.
pub struct DirectoryServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) base_path: String,
    pub(crate) records: Arc<dyn RecordStore>,
    pub(crate) workers: Option<usize>,
}

impl DirectoryServerConfig {
    /// Serve `records` under `/api` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, records: Arc<dyn RecordStore>) -> Self {
        Self {
            bind_addr,
            base_path: DIRECTORY_BASE_PATH.to_owned(),
            records,
            workers: None,
        }
    }

    /// Resolve settings into a configuration, loading the seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a setting is invalid or the seed cannot
    /// be loaded.
    pub fn from_settings(settings: &UsuariosSettings) -> Result<Self, SettingsError> {
        let records = load_records(settings.seed_path())?;
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            base_path: settings.base_path()?,
            records,
            workers: None,
        })
    }

    /// Replace the path prefix of the directory endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBasePath`] for prefixes with whitespace.
    pub fn with_base_path(mut self, base_path: &str) -> Result<Self, SettingsError> {
        self.base_path = normalise_base_path(base_path)?;
        Ok(self)
    }

    /// Limit the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the normalised path prefix.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

/// Builder-style configuration for the order aggregation server.
pub struct AggregationServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) base_path: String,
    pub(crate) user_orders: Arc<dyn UserOrdersQuery>,
    pub(crate) workers: Option<usize>,
}

impl AggregationServerConfig {
    /// Serve `user_orders` at the root path on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, user_orders: Arc<dyn UserOrdersQuery>) -> Self {
        Self {
            bind_addr,
            base_path: String::new(),
            user_orders,
            workers: None,
        }
    }

    /// Resolve settings into a configuration.
    ///
    /// Builds the HTTP directory client and the local order store, then
    /// wires both into a [`UserOrdersService`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a setting is invalid, the seed cannot be
    /// loaded, or the HTTP client cannot be built.
    pub fn from_settings(settings: &PedidosSettings) -> Result<Self, SettingsError> {
        let base_url = settings.usuarios_base_url()?;
        let timeout = settings.usuarios_timeout()?;
        let directory = HttpUserDirectory::new(&base_url, timeout)?;
        info!(
            endpoint = %directory.endpoint(),
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "configured user directory client"
        );
        let records = load_records(settings.seed_path())?;
        let service = UserOrdersService::new(Arc::new(directory), records);
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            base_path: settings.base_path()?,
            user_orders: Arc::new(service),
            workers: None,
        })
    }

    /// Replace the path prefix of the aggregation endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBasePath`] for prefixes with whitespace.
    pub fn with_base_path(mut self, base_path: &str) -> Result<Self, SettingsError> {
        self.base_path = normalise_base_path(base_path)?;
        Ok(self)
    }

    /// Limit the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the normalised path prefix.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

fn load_records(seed_path: Option<&Path>) -> Result<Arc<dyn RecordStore>, SettingsError> {
    let store = match seed_path {
        Some(path) => SeedRecordStore::from_path(path)?,
        None => SeedRecordStore::default(),
    };
    Ok(Arc::new(store))
}
