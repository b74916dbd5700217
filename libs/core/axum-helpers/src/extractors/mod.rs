//! Custom extractors for Axum handlers.
//!
//! All of them reject with the standard [`ErrorResponse`](crate::ErrorResponse) body.

pub mod json_body;
pub mod query_params;
pub mod uuid_path;
pub mod validated_json;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
