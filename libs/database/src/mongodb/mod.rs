//! MongoDB connector and document helpers

mod config;
mod connector;
mod health;
pub mod timestamp;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{
    MongoError, client_options, connect, connect_from_config, connect_from_config_with_retry,
    connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};

use mongodb::bson::{Binary, Bson, spec::BinarySubtype};
use mongodb::error::{ErrorKind, WriteFailure};
use uuid::Uuid;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// BSON form of a UUID as stored in `_id` and reference fields.
///
/// Documents are written through the driver's raw serializer, which encodes a
/// `Uuid` as 16 bytes of generic binary. Filters must use the same encoding.
pub fn uuid_bson(id: &Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

/// BSON array of UUIDs for `$in` filters.
pub fn uuid_array(ids: &[Uuid]) -> Bson {
    Bson::Array(ids.iter().map(uuid_bson).collect())
}

/// `true` when a write was rejected by a unique index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Read a numeric aggregation result regardless of its BSON width.
pub fn bson_f64(value: Option<&Bson>) -> f64 {
    match value {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

/// Integer counterpart of [`bson_f64`].
pub fn bson_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}
