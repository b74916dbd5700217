//! Rooms Domain
//!
//! Room inventory for the hotel: numbering, type, capacity, nightly price,
//! amenities and the availability flag used by the front desk.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, unique room numbers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_rooms::{handlers, MongoRoomRepository, RoomService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("hotel");
//!
//! let repository = MongoRoomRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(RoomService::new(repository));
//! # Ok(())
//! # }
//! ```
//!
//! The `mock` feature exports [`MockRoomRepository`] for services in other
//! domains that depend on room lookups.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoRoomRepository;
pub use error::{RoomError, RoomResult};
pub use handlers::ApiDoc;
pub use models::{
    AvailabilityUpdate, CreateRoom, Room, RoomCriteria, RoomDeleted, RoomSearch, RoomSearchResult,
    RoomType, UpdateRoom,
};
pub use repository::RoomRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockRoomRepository;
pub use service::RoomService;
