use serde::Deserialize;

use crate::traits::Resolve;


/// Used when `statement_cache_capacity` is not set.
pub const DEFAULT_STATEMENT_CACHE_CAPACITY: usize = 200;


#[derive(Deserialize, Debug, Clone)]
pub(crate) struct UnresolvedDatabaseConfiguration {
    host: String,

    port: u16,

    username: String,

    password: Option<String>,

    database_name: String,

    statement_cache_capacity: Option<usize>,
}


/// PostgreSQL-related configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfiguration {
    /// Host of the database.
    pub host: String,

    /// Port the database is listening at.
    pub port: u16,

    /// Login username.
    pub username: String,

    /// Login password.
    pub password: Option<String>,

    /// Database name.
    pub database_name: String,

    /// Number of prepared statements cached per connection.
    pub statement_cache_capacity: usize,
}

impl Resolve for UnresolvedDatabaseConfiguration {
    type Resolved = DatabaseConfiguration;

    fn resolve(self) -> Self::Resolved {
        Self::Resolved {
            host: self.host,
            port: self.port,
            username: self.username,
            password: self.password,
            database_name: self.database_name,
            statement_cache_capacity: self
                .statement_cache_capacity
                .unwrap_or(DEFAULT_STATEMENT_CACHE_CAPACITY),
        }
    }
}
