use serde::Deserialize;

use crate::{traits::TryResolve, HttpConfigurationError};


/// Used when `json_body_limit_bytes` is not set (1 MiB).
pub const DEFAULT_JSON_BODY_LIMIT_BYTES: usize = 1024 * 1024;


#[derive(Deserialize, Debug, Clone)]
pub(crate) struct UnresolvedHttpConfiguration {
    host: String,

    port: u16,

    json_body_limit_bytes: Option<usize>,
}


/// Actix HTTP server-related configuration.
#[derive(Debug, Clone)]
pub struct HttpConfiguration {
    /// Host to bind the HTTP server to.
    pub host: String,

    /// Port to bind the HTTP server to.
    pub port: u16,

    /// Largest JSON request body the server will accept.
    /// Larger bodies are rejected with `413 Payload Too Large`.
    pub json_body_limit_bytes: usize,
}

impl TryResolve for UnresolvedHttpConfiguration {
    type Resolved = HttpConfiguration;
    type Error = HttpConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let json_body_limit_bytes = self
            .json_body_limit_bytes
            .unwrap_or(DEFAULT_JSON_BODY_LIMIT_BYTES);

        if json_body_limit_bytes == 0 {
            return Err(HttpConfigurationError::ZeroJsonBodyLimit);
        }

        Ok(Self::Resolved {
            host: self.host,
            port: self.port,
            json_body_limit_bytes,
        })
    }
}
