//! Authentication module
//!
//! Password hashing (bcrypt or argon2), JWT session tokens carried in an
//! HTTP-only cookie, and CSRF protection for browser clients.

pub mod cookie;
mod csrf;
mod jwt;
mod middleware;
mod password;

pub use csrf::{csrf_guard, new_csrf_token, CSRF_HEADER};
pub use jwt::{Claims, SessionTokenManager, TokenPayload, MAX_TOKEN_EXPIRY_SECS};
pub use middleware::AuthUser;
pub use password::PasswordService;
