pub mod repository;

pub use repository::{CassandraMigrationRepository, MigrationStore};
