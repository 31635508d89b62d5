//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the stores and the authentication primitives.

pub mod auth;
pub mod task;
pub mod user;

pub use auth::AuthService;
pub use task::TaskService;
pub use user::UserService;
