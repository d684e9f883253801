use std::sync::Arc;

use tracing::info;

use crate::connection::CqlConnection;
use crate::errors::MigrateError;
use crate::schema::blueprint::TableBlueprint;
use crate::schema::grammar;

/// Factory override used to construct blueprints; receives the table name
/// and the index-name prefix.
pub type BlueprintResolver = Box<dyn Fn(&str, &str) -> TableBlueprint + Send + Sync>;

/// Schema builder bound to a CQL connection.
pub struct SchemaBuilder {
    connection: Arc<CqlConnection>,
    resolver: Option<BlueprintResolver>,
}

impl SchemaBuilder {
    pub fn new(connection: Arc<CqlConnection>) -> Self {
        Self {
            connection,
            resolver: None,
        }
    }

    /// Register a blueprint factory override.
    pub fn blueprint_resolver(&mut self, resolver: BlueprintResolver) {
        self.resolver = Some(resolver);
    }

    /// Determine if the given table exists in the current keyspace.
    ///
    /// The check runs on the write-capable session so a table created
    /// earlier in the same session is visible.
    pub async fn has_table(&self, table: &str) -> Result<bool, MigrateError> {
        let table = self.connection.prefix_table(table);
        let keyspace = self.connection.keyspace();

        let result = self
            .connection
            .select_from_write_connection(
                grammar::compile_table_exists(),
                (keyspace, table.as_str()),
            )
            .await?;

        Ok(result.rows_num().unwrap_or(0) > 0)
    }

    /// Construct a blueprint for the given table, honoring a registered
    /// resolver override. The index prefix only applies when the connection
    /// has index prefixing enabled.
    pub fn create_blueprint(&self, table: &str) -> TableBlueprint {
        let index_prefix = if self.connection.prefix_indexes() {
            self.connection.table_prefix()
        } else {
            ""
        };

        match &self.resolver {
            Some(resolver) => resolver(table, index_prefix),
            None => TableBlueprint::new(table, index_prefix),
        }
    }

    /// Create a table from a configured blueprint.
    pub async fn create<F>(&self, table: &str, configure: F) -> Result<(), MigrateError>
    where
        F: FnOnce(&mut TableBlueprint),
    {
        let prefixed = self.connection.prefix_table(table);
        let mut blueprint = self.create_blueprint(&prefixed);
        configure(&mut blueprint);

        let ddl = blueprint.to_cql()?;
        info!("Creating table: {}", prefixed);
        self.connection.execute_simple(&ddl).await?;

        Ok(())
    }

    /// Drop the given table.
    pub async fn drop_table(&self, table: &str) -> Result<(), MigrateError> {
        let prefixed = self.connection.prefix_table(table);
        let ddl = format!("drop table {}", grammar::quote(&prefixed));
        info!("Dropping table: {}", prefixed);
        self.connection.execute_simple(&ddl).await?;

        Ok(())
    }

    /// Drop the given table if it exists.
    pub async fn drop_table_if_exists(&self, table: &str) -> Result<(), MigrateError> {
        let prefixed = self.connection.prefix_table(table);
        let ddl = format!("drop table if exists {}", grammar::quote(&prefixed));
        self.connection.execute_simple(&ddl).await?;

        Ok(())
    }
}
