//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::application::config::{AuthConfig, ConfigError};
use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_principal;

/// `/signup` and `/signin`, both public
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}

/// `/me` and `/`, both behind the bearer guard
pub fn user_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/me", get(handlers::get_me))
        .route("/", patch(handlers::edit_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_principal::<R>,
        ))
        .with_state(state)
}

/// Full router: `/auth/*` and `/users/*`
pub fn app_router<R>(repo: R, config: &AuthConfig) -> Result<Router, ConfigError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config)?;

    Ok(Router::new()
        .nest("/auth", auth_router(state.clone()))
        .nest("/users", user_router(state)))
}
