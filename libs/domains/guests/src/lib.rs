//! Guests Domain
//!
//! Guest registry: contact data and identity documents, with unique emails
//! and paged, case-insensitive search.
//!
//! The `mock` feature exports [`MockGuestRepository`] so that reservation and
//! payment services can be tested without MongoDB.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoGuestRepository;
pub use error::{GuestError, GuestResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateGuest, DocumentType, Guest, GuestDeleted, GuestFilter, GuestMessage, GuestPage, NewGuest,
    UpdateGuest,
};
pub use repository::GuestRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockGuestRepository;
pub use service::GuestService;
