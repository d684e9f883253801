use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::connection::CqlConnection;
use crate::errors::MigrateError;
use crate::schema::{grammar, SchemaBuilder};

/// Capability interface for migration bookkeeping.
///
/// A migration runner depends on this trait rather than on the
/// Cassandra-backed implementation.
#[async_trait]
pub trait MigrationStore: Send + Sync {
    /// Names of completed migrations, ordered by ascending batch.
    async fn list_applied(&self) -> Result<Vec<String>, MigrateError>;

    /// Record that a migration ran as part of the given batch.
    async fn record_applied(&self, file: &str, batch: i32) -> Result<(), MigrateError>;

    /// Create the backing table when it is missing.
    async fn ensure_store(&self) -> Result<(), MigrateError>;
}

/// Migration bookkeeping backed by a Cassandra/ScyllaDB table with the
/// fixed shape {id uuid primary key, migration text, batch int}.
pub struct CassandraMigrationRepository {
    connection: Arc<CqlConnection>,
    table: String,
}

impl CassandraMigrationRepository {
    pub fn new(connection: Arc<CqlConnection>, table: impl Into<String>) -> Self {
        Self {
            connection,
            table: table.into(),
        }
    }

    /// Effective (prefixed) table name.
    fn table(&self) -> String {
        self.connection.prefix_table(&self.table)
    }
}

#[async_trait]
impl MigrationStore for CassandraMigrationRepository {
    async fn list_applied(&self) -> Result<Vec<String>, MigrateError> {
        let query = select_applied_cql(&self.table());

        let result = self
            .connection
            .select_from_write_connection(&query, ())
            .await?;

        let rows = result
            .rows_typed::<(String, i32)>()
            .map_err(|e| MigrateError::Migration(format!("Unexpected result shape: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let record =
                row.map_err(|e| MigrateError::Migration(format!("Failed to decode row: {}", e)))?;
            records.push(record);
        }

        Ok(names_by_batch(records))
    }

    async fn record_applied(&self, file: &str, batch: i32) -> Result<(), MigrateError> {
        let query = insert_applied_cql(&self.table());

        self.connection
            .execute_with_values(&query, (Uuid::new_v4(), file, batch))
            .await?;

        Ok(())
    }

    async fn ensure_store(&self) -> Result<(), MigrateError> {
        let builder = SchemaBuilder::new(self.connection.clone());
        if builder.has_table(&self.table).await? {
            return Ok(());
        }

        info!("Creating migration repository table: {}", self.table);
        builder
            .create(&self.table, |table| {
                table.uuid("id");
                table.text("migration");
                table.int("batch");
                table.primary("id");
            })
            .await
    }
}

/// Statement reading every bookkeeping row.
fn select_applied_cql(table: &str) -> String {
    format!(
        "select \"migration\", \"batch\" from {}",
        grammar::quote(table)
    )
}

/// Statement recording one applied migration.
fn insert_applied_cql(table: &str) -> String {
    format!(
        "insert into {} (\"id\", \"migration\", \"batch\") values (?, ?, ?)",
        grammar::quote(table)
    )
}

/// Sort records by ascending batch and keep the migration names. The sort
/// is stable: rows within one batch keep their arrival order, and duplicate
/// names are kept as-is.
fn names_by_batch(mut records: Vec<(String, i32)>) -> Vec<String> {
    records.sort_by_key(|(_, batch)| *batch);
    records.into_iter().map(|(migration, _)| migration).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_ordered_by_batch() {
        let records = vec![
            ("003_add_index".to_string(), 2),
            ("001_create_users".to_string(), 1),
            ("004_add_events".to_string(), 3),
            ("002_create_posts".to_string(), 1),
        ];

        assert_eq!(
            names_by_batch(records),
            vec![
                "001_create_users",
                "002_create_posts",
                "003_add_index",
                "004_add_events"
            ]
        );
    }

    #[test]
    fn test_arrival_order_kept_within_batch() {
        let records = vec![
            ("b".to_string(), 1),
            ("a".to_string(), 1),
            ("c".to_string(), 1),
        ];

        assert_eq!(names_by_batch(records), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let records = vec![
            ("001_create_users".to_string(), 1),
            ("001_create_users".to_string(), 2),
        ];

        assert_eq!(
            names_by_batch(records),
            vec!["001_create_users", "001_create_users"]
        );
    }

    #[test]
    fn test_empty_store() {
        assert!(names_by_batch(Vec::new()).is_empty());
    }

    #[test]
    fn test_select_statement_text() {
        assert_eq!(
            select_applied_cql("app_migrations"),
            "select \"migration\", \"batch\" from \"app_migrations\""
        );
    }

    #[test]
    fn test_insert_statement_text() {
        assert_eq!(
            insert_applied_cql("app_migrations"),
            "insert into \"app_migrations\" (\"id\", \"migration\", \"batch\") values (?, ?, ?)"
        );
    }

    struct InMemoryStore {
        records: std::sync::Mutex<Vec<(String, i32)>>,
    }

    #[async_trait]
    impl MigrationStore for InMemoryStore {
        async fn list_applied(&self) -> Result<Vec<String>, MigrateError> {
            Ok(names_by_batch(self.records.lock().unwrap().clone()))
        }

        async fn record_applied(&self, file: &str, batch: i32) -> Result<(), MigrateError> {
            self.records
                .lock()
                .unwrap()
                .push((file.to_string(), batch));
            Ok(())
        }

        async fn ensure_store(&self) -> Result<(), MigrateError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_orders_across_batches() {
        let store = InMemoryStore {
            records: std::sync::Mutex::new(Vec::new()),
        };
        let store: &dyn MigrationStore = &store;

        store.record_applied("002_create_posts", 2).await.unwrap();
        store.record_applied("001_create_users", 1).await.unwrap();

        assert_eq!(
            store.list_applied().await.unwrap(),
            vec!["001_create_users", "002_create_posts"]
        );
    }
}
