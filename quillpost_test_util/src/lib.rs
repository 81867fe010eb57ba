//! End-to-end test harness: starts the real quillpost HTTP server on an ephemeral
//! port and talks to it over HTTP.
//!
//! The server is backed by an in-memory database, or by a temporary PostgreSQL
//! database when started with [`TestServer::start_with_postgres`].

pub mod prelude;
mod response;
pub mod sample_blogs;
pub mod sample_categories;
mod server;
pub use response::*;
pub use server::*;
