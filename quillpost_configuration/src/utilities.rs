use std::{env::current_dir, path::PathBuf};

use crate::ConfigurationLoadingError;


/// Returns the default configuration file path, which is
/// `{current directory}/data/configuration.toml`.
pub(crate) fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationLoadingError> {
    let current_directory = current_dir()
        .map_err(|error| ConfigurationLoadingError::UnableToDetermineCurrentDirectory { error })?;

    let configuration_file_path = current_directory.join("data").join("configuration.toml");

    Ok(dunce::simplified(&configuration_file_path).to_path_buf())
}
