use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub hosts: Vec<String>,
    pub port: u16,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connection_timeout: Duration,
    pub pool_size: u32,
    /// Prefix applied to every table name the adapter touches.
    pub table_prefix: String,
    /// Apply the table prefix to generated index names as well.
    pub prefix_indexes: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["localhost".to_string()],
            port: 9042,
            keyspace: "system".to_string(),
            username: None,
            password: None,
            connection_timeout: Duration::from_secs(5),
            pool_size: 4,
            table_prefix: String::new(),
            prefix_indexes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.port, 9042);
        assert_eq!(config.hosts, vec!["localhost".to_string()]);
        assert!(config.table_prefix.is_empty());
        assert!(!config.prefix_indexes);
    }
}
