use std::num::NonZeroUsize;
use std::sync::Arc;

use scylla::serialize::row::SerializeRow;
use scylla::transport::session::PoolSize;
use scylla::{QueryResult, Session, SessionBuilder};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::MigrateError;

/// CQL connection wrapper around a single driver session.
///
/// The session talks to cluster coordinators directly, so schema metadata
/// reads issued through it observe DDL executed on the same session; there
/// is no separate read-replica path at this layer.
pub struct CqlConnection {
    session: Arc<Session>,
    config: DatabaseConfig,
}

impl CqlConnection {
    /// Connect to the cluster described by the config.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, MigrateError> {
        info!("Connecting to CQL cluster: {:?}", config.hosts);

        let contact_points: Vec<String> = config
            .hosts
            .iter()
            .map(|h| format!("{}:{}", h, config.port))
            .collect();

        let pool_size = NonZeroUsize::new(config.pool_size as usize)
            .unwrap_or(NonZeroUsize::new(4).unwrap());

        let mut session_builder = SessionBuilder::new()
            .known_nodes(&contact_points)
            .pool_size(PoolSize::PerShard(pool_size))
            .connection_timeout(config.connection_timeout)
            .use_keyspace(&config.keyspace, true);

        // Add authentication if provided
        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            session_builder = session_builder.user(username, password);
        }

        let session = session_builder
            .build()
            .await
            .map_err(|e| MigrateError::Database(format!("Failed to connect: {}", e)))?;

        info!("Connected to keyspace: {}", config.keyspace);

        Ok(Self {
            session: Arc::new(session),
            config: config.clone(),
        })
    }

    /// Get the underlying driver session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Name of the keyspace this connection operates in.
    pub fn keyspace(&self) -> &str {
        &self.config.keyspace
    }

    /// Configured table-name prefix.
    pub fn table_prefix(&self) -> &str {
        &self.config.table_prefix
    }

    /// Whether generated index names carry the table prefix.
    pub fn prefix_indexes(&self) -> bool {
        self.config.prefix_indexes
    }

    /// Apply the configured table-name prefix.
    pub fn prefix_table(&self, table: &str) -> String {
        format!("{}{}", self.config.table_prefix, table)
    }

    /// Execute a statement without values.
    pub async fn execute_simple(&self, query: &str) -> Result<QueryResult, MigrateError> {
        Ok(self.session.query_unpaged(query, ()).await?)
    }

    /// Execute a statement with serializable values.
    pub async fn execute_with_values<V: SerializeRow>(
        &self,
        query: &str,
        values: V,
    ) -> Result<QueryResult, MigrateError> {
        self.session
            .query_unpaged(query, values)
            .await
            .map_err(|e| MigrateError::Database(format!("Query execution failed: {}", e)))
    }

    /// Run a metadata read on the write-capable session.
    ///
    /// Schema existence checks go through here so a table created moments
    /// ago on this session is visible to the check.
    pub async fn select_from_write_connection<V: SerializeRow>(
        &self,
        query: &str,
        values: V,
    ) -> Result<QueryResult, MigrateError> {
        self.execute_with_values(query, values).await
    }
}
