//! Types shared between the API server, the database layer and API clients:
//! strongly-typed identifiers, request and response models,
//! error reasons, slug derivation and blog ordering.

pub mod api_models;
pub mod ids;
pub mod ordering;
pub mod slug;
pub mod validation;
