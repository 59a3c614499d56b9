use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::auth::validate_token;
use crate::handlers::AppState;
use crate::models::Claims;
use crate::session::PortalSession;

// Extension to store the caller's claims and live session in the request
#[derive(Clone)]
pub struct AuthUser {
    pub claims: Claims,
    pub session: PortalSession,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract the Authorization header
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| unauthorized("Missing bearer token"))?;

    // Extract the token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Missing bearer token"))?;

    // Validate the token
    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        debug!("Rejected portal token: {}", e);
        unauthorized("Invalid token")
    })?;

    // The session must still be live (logout removes it)
    let session = state
        .sessions
        .get(&claims.sid)
        .await
        .filter(PortalSession::is_authenticated)
        .ok_or_else(|| unauthorized("Session has ended"))?;

    request.extensions_mut().insert(AuthUser { claims, session });

    Ok(next.run(request).await)
}

pub async fn require_faculty(request: Request, next: Next) -> Result<Response, impl IntoResponse> {
    // Get the session from the request extensions
    let auth_user = request.extensions().get::<AuthUser>().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        )
    })?;

    // Check the role of the live session, not just the token
    if !auth_user.session.is_faculty() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Faculty access required"
            })),
        ));
    }

    Ok(next.run(request).await)
}
