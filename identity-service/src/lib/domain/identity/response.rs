use chrono::DateTime;
use chrono::Utc;
use http::StatusCode;
use serde::Serialize;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::AuthenticationResult;
use crate::domain::identity::models::Identity;

/// Transport-neutral outcome of a signup or login: a status plus a body.
///
/// The inbound adapter turns this into a wire response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Identity(IdentitySummary),
    Token { token: String },
    Error { message: String },
}

/// Created record as shown to the caller. Carries no password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.as_str().to_string(),
            name: identity.display_name.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

impl AuthResponse {
    /// 201 with the record summary, or the error mapping.
    pub fn from_signup(result: Result<Identity, AuthError>) -> Self {
        match result {
            Ok(ref identity) => Self {
                status: StatusCode::CREATED,
                body: ResponseBody::Identity(identity.into()),
            },
            Err(ref err) => Self::from_error(err),
        }
    }

    /// 200 with the token, or the error mapping.
    pub fn from_login(result: Result<AuthenticationResult, AuthError>) -> Self {
        match result {
            Ok(result) => Self {
                status: StatusCode::OK,
                body: ResponseBody::Token {
                    token: result.access_token,
                },
            },
            Err(ref err) => Self::from_error(err),
        }
    }

    pub fn from_error(err: &AuthError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!(error = %err, "Request failed");
        }

        Self::error(status, err.public_message())
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error {
                message: message.into(),
            },
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::Conflict(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) | AuthError::Hashing(_) | AuthError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the caller. Infrastructure details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Storage(_) => "storage error".to_string(),
            AuthError::Hashing(_) => "password hashing error".to_string(),
            AuthError::Token(_) => "token error".to_string(),
            _ => self.to_string(),
        }
    }
}
