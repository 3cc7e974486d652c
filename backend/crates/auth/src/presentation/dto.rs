//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entity::account::AccountView;

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Credentials request, shared by sign up and sign in
#[derive(Clone, Deserialize)]
pub struct AuthRequest {
    #[serde(alias = "identifier")]
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign up response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub data: AccountView,
}

/// Sign in response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub message: String,
    pub payload: AccessTokenPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenPayload {
    pub access_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Profile update request. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub message: String,
    pub payload: UserPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub user: AccountView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_request_identifier_alias() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"identifier":"a@b.io","password":"pw"}"#).unwrap();
        assert_eq!(req.email, "a@b.io");
    }

    #[test]
    fn test_auth_request_debug_redacts_password() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"email":"a@b.io","password":"hunter22"}"#).unwrap();
        assert!(!format!("{:?}", req).contains("hunter22"));
    }

    #[test]
    fn test_edit_user_request_optional_fields() {
        let req: EditUserRequest = serde_json::from_str(r#"{"lastName":"Lovelace"}"#).unwrap();
        assert!(req.first_name.is_none());
        assert_eq!(req.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_sign_in_response_shape() {
        let body = SignInResponse {
            message: "Successful Sign In".to_string(),
            payload: AccessTokenPayload {
                access_token: "t".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["payload"]["access_token"], "t");
    }
}
