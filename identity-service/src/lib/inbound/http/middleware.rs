use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::response::AuthResponse;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified token subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Middleware that verifies bearer tokens and adds the subject to request extensions.
///
/// Every failure yields the same 401 so the caller cannot tell which check failed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).ok_or_else(unauthorized)?;

    let claims = state.auth_service.verify_token(token).map_err(|_| {
        tracing::warn!("Bearer token rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        expires_at: claims.expires_at(),
        email: claims.sub,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> Response {
    AuthResponse::from_error(&AuthError::InvalidToken).into_response()
}
