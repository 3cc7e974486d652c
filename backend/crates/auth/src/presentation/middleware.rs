//! Auth Middleware
//!
//! Bearer token guard for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::AuthorizeUseCase;
use crate::domain::repository::AccountRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid bearer token
///
/// On success the [`Principal`](crate::application::Principal) is inserted
/// into the request extensions for handlers to extract.
pub async fn require_principal<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers())
        .map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            AuthError::Unauthorized
        })?
        .to_owned();

    let use_case = AuthorizeUseCase::new(state.repo.clone(), state.tokens.clone());
    let principal = use_case.execute(&token).await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
