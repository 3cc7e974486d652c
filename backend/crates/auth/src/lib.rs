//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, credential hashing
//! - `infra/` - PostgreSQL and in-memory account stores
//! - `presentation/` - HTTP handlers, DTOs, extractors, router
//!
//! ## Features
//! - Sign up / sign in with email + password
//! - Stateless bearer access tokens (HS256 JWT, 15 minutes)
//! - Guarded `/users` routes with the current account attached to the request
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, random salt, optional pepper
//! - Unknown identifier and wrong password are indistinguishable to clients
//! - Password hashes never leave the service: responses use `AccountView`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use application::{Principal, TokenService};
pub use domain::entity::account::{Account, AccountView};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountRepository, PgAccountRepository};
pub use presentation::router::{app_router, auth_router, user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{
        AccountRepository, LocalAccountRepository, StoreError, StoreResult,
    };
    pub use crate::infra::{InMemoryAccountRepository, PgAccountRepository};
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
