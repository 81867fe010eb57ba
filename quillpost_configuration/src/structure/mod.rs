use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod database;
mod http;
mod logging;

pub use database::*;
pub use http::*;
pub use logging::*;

use crate::traits::{Resolve, TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Configuration related to the HTTP server.
    http: UnresolvedHttpConfiguration,

    /// Configuration related to the database.
    database: UnresolvedDatabaseConfiguration,
}


/// The entire quillpost backend configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Configuration related to the HTTP server.
    pub http: HttpConfiguration,

    /// Configuration related to the database.
    pub database: DatabaseConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl TryResolveWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let logging = self.logging.try_resolve()?;
        let http = self.http.try_resolve()?;
        let database = self.database.resolve();

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            logging,
            http,
            database,
        })
    }
}


impl Configuration {
    /// Parse and validate configuration from a TOML string.
    ///
    /// `configuration_file_path` is only recorded, not read.
    pub fn load_from_str<P: Into<PathBuf>>(
        configuration_string: &str,
        configuration_file_path: P,
    ) -> Result<Self, ConfigurationLoadingError> {
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path: configuration_file_path.into(),
            })?;

        Ok(resolved_configuration)
    }

    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        let configuration_string =
            fs::read_to_string(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToReadConfigurationFile {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        Self::load_from_str(
            &configuration_string,
            configuration_file_path.as_ref(),
        )
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path()?)
    }
}



#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_CONFIGURATION: &str = r#"
        [logging]
        console_output_level_filter = "info"
        log_file_output_level_filter = "debug,sqlx=warn"
        log_file_output_directory = "./data/logs"

        [http]
        host = "127.0.0.1"
        port = 8000

        [database]
        host = "localhost"
        port = 5432
        username = "quillpost"
        database_name = "quillpost"
    "#;

    #[test]
    fn parses_sample_configuration_and_fills_in_defaults() {
        let configuration =
            Configuration::load_from_str(SAMPLE_CONFIGURATION, "configuration.toml").unwrap();

        assert_eq!(configuration.http.host, "127.0.0.1");
        assert_eq!(configuration.http.port, 8000);
        assert_eq!(
            configuration.http.json_body_limit_bytes,
            DEFAULT_JSON_BODY_LIMIT_BYTES
        );

        assert_eq!(configuration.database.password, None);
        assert_eq!(
            configuration.database.statement_cache_capacity,
            DEFAULT_STATEMENT_CACHE_CAPACITY
        );

        assert_eq!(
            configuration.logging.log_file_output_directory,
            PathBuf::from("./data/logs")
        );
        assert_eq!(
            configuration.configuration_file_path,
            PathBuf::from("configuration.toml")
        );
    }

    #[test]
    fn rejects_invalid_tracing_filters() {
        let invalid_configuration = SAMPLE_CONFIGURATION.replace(
            "console_output_level_filter = \"info\"",
            "console_output_level_filter = \"quillpost=verbose\"",
        );

        let error = Configuration::load_from_str(&invalid_configuration, "configuration.toml")
            .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError { .. }
            }
        ));
    }

    #[test]
    fn rejects_missing_tables() {
        let error = Configuration::load_from_str("[logging]\n", "configuration.toml").unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ParsingError { .. }
        ));
    }

    #[test]
    fn rejects_zero_json_body_limit() {
        let configuration_string = SAMPLE_CONFIGURATION.replace(
            "port = 8000",
            "port = 8000\njson_body_limit_bytes = 0",
        );

        assert!(Configuration::load_from_str(&configuration_string, "configuration.toml").is_err());
    }
}
