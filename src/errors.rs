use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("No primary key has been set for the table")]
    NoPrimaryKey,
}

impl From<scylla::transport::errors::QueryError> for MigrateError {
    fn from(err: scylla::transport::errors::QueryError) -> Self {
        MigrateError::Database(err.to_string())
    }
}
