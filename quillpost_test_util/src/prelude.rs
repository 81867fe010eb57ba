pub use quillpost_core::api_models::*;
pub use quillpost_core::ids::{BlogId, CategoryId};
pub use reqwest::{header, Method, StatusCode};
pub use uuid::Uuid;

pub use super::sample_blogs::*;
pub use super::sample_categories::*;
pub use super::server::TestServer;
pub use super::TestResponse;
