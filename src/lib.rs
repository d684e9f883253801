//! Cassandra/ScyllaDB adapters for ORM-style schema migrations.
//!
//! Two independent pieces: a [`migration::MigrationStore`] that tracks which
//! migrations have run in a fixed-shape bookkeeping table, and a
//! [`schema::TableBlueprint`] / [`schema::SchemaBuilder`] pair that
//! translates fluent column and key declarations into Cassandra's
//! table-definition CQL.
//!
//! Wire protocol, node discovery, retries and consistency levels are the
//! driver's job; this crate only produces table-creation DDL fragments and
//! reads cluster schema metadata.

pub mod config;
pub mod connection;
pub mod errors;
pub mod migration;
pub mod schema;

pub use config::DatabaseConfig;
pub use connection::CqlConnection;
pub use errors::MigrateError;
pub use migration::{CassandraMigrationRepository, MigrationStore};
pub use schema::{KeySpec, SchemaBuilder, TableBlueprint, TableOptions};
