use crate::connection::Connection;
use crate::error::{self as ex_error, ExecutionResult};
use datafusion::catalog::{
    CatalogProvider, CatalogProviderList, MemoryCatalogProvider, MemoryCatalogProviderList,
    MemorySchemaProvider,
};
use datafusion::execution::runtime_env::{RuntimeEnv, RuntimeEnvBuilder};
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_CATALOG: &str = "geoscope";
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub default_catalog: String,
    pub default_schema: String,
    /// Whether sessions may load the `st_*` spatial functions.
    pub spatial: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            default_catalog: DEFAULT_CATALOG.to_string(),
            default_schema: DEFAULT_SCHEMA.to_string(),
            spatial: true,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub const fn with_spatial(mut self, spatial: bool) -> Self {
        self.spatial = spatial;
        self
    }
}

/// In-memory analytical database shared by every connection.
///
/// Only the catalog and the runtime are shared; each [`Connection`] gets its own
/// session state, so nothing leaks between requests apart from the tables themselves.
#[derive(Clone)]
pub struct Database {
    catalogs: Arc<dyn CatalogProviderList>,
    runtime: Arc<RuntimeEnv>,
    config: Arc<DatabaseConfig>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> ExecutionResult<Self> {
        let catalog = MemoryCatalogProvider::new();
        catalog
            .register_schema(&config.default_schema, Arc::new(MemorySchemaProvider::new()))
            .context(ex_error::DataFusionSnafu)?;
        let catalogs = MemoryCatalogProviderList::new();
        catalogs.register_catalog(config.default_catalog.clone(), Arc::new(catalog));

        let runtime = RuntimeEnvBuilder::new()
            .build_arc()
            .context(ex_error::DataFusionSnafu)?;

        tracing::debug!(
            catalog = %config.default_catalog,
            schema = %config.default_schema,
            spatial = config.spatial,
            "Database created"
        );
        Ok(Self {
            catalogs: Arc::new(catalogs),
            runtime,
            config: Arc::new(config),
        })
    }

    pub fn in_memory() -> ExecutionResult<Self> {
        Self::new(DatabaseConfig::default())
    }

    /// Opens a short-lived session over the shared catalog.
    #[must_use]
    pub fn connect(&self) -> Connection {
        Connection::new(
            self.catalogs.clone(),
            self.runtime.clone(),
            self.config.clone(),
        )
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .field("catalogs", &self.catalogs.catalog_names())
            .finish_non_exhaustive()
    }
}
