//! Users Domain
//!
//! Back-office staff accounts. Passwords are stored as argon2 hashes and a
//! successful register or login returns a signed JWT carrying the user id and
//! role. Only `/me` sits behind [`axum_helpers::jwt_auth_middleware`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoUserRepository;
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState};
pub use models::{
    AuthResponse, LoginRequest, NewUser, ProfileResponse, RegisterRequest, Role, User, UserResponse,
};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
