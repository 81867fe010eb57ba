use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::{traits::TryResolve, LoggingConfigurationError};


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}


fn validate_tracing_filter(
    filter: &str,
    kind: &'static str,
) -> Result<(), LoggingConfigurationError> {
    EnvFilter::try_new(filter)
        .map(|_| ())
        .map_err(|error| LoggingConfigurationError::InvalidTracingFilter {
            invalid_filter: filter.to_string(),
            kind: kind.into(),
            error,
        })
}

impl TryResolve for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        validate_tracing_filter(
            &self.console_output_level_filter,
            "console_output_level_filter",
        )?;

        validate_tracing_filter(
            &self.log_file_output_level_filter,
            "log_file_output_level_filter",
        )?;

        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory: PathBuf::from(self.log_file_output_directory),
        })
    }
}

impl LoggingConfiguration {
    // Both filters were validated while resolving, so `EnvFilter::new`
    // (which skips invalid directives instead of failing) sees only valid input.

    pub fn console_output_level_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.console_output_level_filter)
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.log_file_output_level_filter)
    }
}
