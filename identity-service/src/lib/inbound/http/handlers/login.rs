use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::models::LoginRequest;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::response::AuthResponse;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> AuthResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return AuthResponse::error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    AuthResponse::from_login(state.auth_service.login(body.into()).await)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl From<LoginRequestBody> for LoginRequest {
    fn from(body: LoginRequestBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}
