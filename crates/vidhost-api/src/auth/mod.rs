//! Bearer-token authentication.
//!
//! Access tokens are HS256 JWTs whose subject is the caller's user id. Handlers
//! take a [`UserContext`] argument; extracting it validates the token.

pub mod jwt;
pub mod models;

pub use jwt::{get_bearer_token, make_jwt, JwtValidator, TokenValidator};
pub use models::{AuthState, UserContext};
