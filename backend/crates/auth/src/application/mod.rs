//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod edit_profile;
pub mod hasher;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use authorize::{AuthorizeUseCase, Principal};
pub use config::{AuthConfig, ConfigError};
pub use edit_profile::{EditProfileInput, EditProfileUseCase};
pub use hasher::CredentialHasher;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{AccountRef, TokenClaims, TokenError, TokenService};
