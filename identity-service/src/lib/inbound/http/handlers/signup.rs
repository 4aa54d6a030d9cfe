use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::models::SignupRequest;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::response::AuthResponse;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequestBody>, JsonRejection>,
) -> AuthResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return AuthResponse::error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    AuthResponse::from_signup(state.auth_service.signup(body.into()).await)
}

/// HTTP request body for signup (raw JSON).
///
/// Missing fields read as empty strings and fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

impl From<SignupRequestBody> for SignupRequest {
    fn from(body: SignupRequestBody) -> Self {
        Self {
            username: body.username,
            display_name: body.name,
            email: body.email,
            password: body.password,
            password_confirmation: body.confirm_password,
        }
    }
}
