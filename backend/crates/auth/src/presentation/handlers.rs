//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    AuthConfig, ConfigError, CredentialHasher, EditProfileInput, EditProfileUseCase, Principal,
    SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, TokenService,
};
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AccessTokenPayload, AuthRequest, EditUserRequest, SignInResponse, SignUpResponse, UserPayload,
    UserResponse,
};
use crate::presentation::extract::JsonBody;

/// Shared state for auth handlers and the bearer guard
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub hasher: CredentialHasher,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R> {
    pub fn new(repo: R, config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            repo: Arc::new(repo),
            hasher: CredentialHasher::from_config(config)?,
            tokens: Arc::new(TokenService::from_config(config)),
        })
    }
}

// Manual impl: the repository itself need not be Clone
impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            hasher: self.hasher.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<AuthRequest>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = SignUpInput {
        identifier: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "Successful Sign Up".to_string(),
            data: output.account,
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<AuthRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let input = SignInInput {
        identifier: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SignInResponse {
        message: "Successful Sign In".to_string(),
        payload: AccessTokenPayload {
            access_token: output.access_token,
        },
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users/me
pub async fn get_me(principal: Principal) -> Json<UserResponse> {
    Json(UserResponse {
        message: "Success".to_string(),
        payload: UserPayload {
            user: principal.into_account(),
        },
    })
}

/// PATCH /users
pub async fn edit_user<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
    JsonBody(req): JsonBody<EditUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = EditProfileUseCase::new(state.repo.clone());

    let input = EditProfileInput {
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let user = use_case.execute(&principal, input).await?;

    Ok(Json(UserResponse {
        message: "Successful Update".to_string(),
        payload: UserPayload { user },
    }))
}
