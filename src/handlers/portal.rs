use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::error;

use crate::auth::create_token;
use crate::directory::PortalError;
use crate::middleware::AuthUser;
use crate::models::{
    AuthResponse, Claims, IdentityRecord, LoginRequest, RegisterRequest, StudentInfo,
};
use crate::session::PortalSession;

use super::AppState;

type ApiError = (StatusCode, Json<Value>);

fn error_response(err: PortalError) -> ApiError {
    let status = match &err {
        PortalError::DuplicateIdentity(_) => StatusCode::CONFLICT,
        PortalError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        PortalError::Validation(_) => StatusCode::BAD_REQUEST,
        PortalError::Storage(_) | PortalError::PasswordHash(_) => {
            error!("Portal request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(json!({
            "error": err.to_string()
        })),
    )
}

/// Park the authenticated session in the registry and sign a token for it
async fn issue_token(
    state: &AppState,
    session: PortalSession,
    record: IdentityRecord,
) -> Result<AuthResponse, ApiError> {
    let expires_at = Utc::now() + chrono::Duration::seconds(state.config.token_expiration_secs);
    let sid = state.sessions.insert(session, expires_at).await;

    let claims = Claims {
        sub: record.subject_id.clone(),
        name: record.display_name.clone(),
        role: record.role,
        sid: sid.clone(),
        exp: expires_at.timestamp() as usize,
    };

    match create_token(&claims, &state.config.jwt_secret) {
        Ok(token) => Ok(AuthResponse {
            token,
            user: StudentInfo::from(record),
        }),
        Err(e) => {
            error!("Failed to create token: {}", e);
            state.sessions.remove(&sid).await;
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to create token"
                })),
            ))
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let mut session = PortalSession::new();
    let record = state
        .directory
        .register(&mut session, payload)
        .await
        .map_err(error_response)?;

    let response = issue_token(&state, session, record).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let mut session = PortalSession::new();
    let record = state
        .directory
        .login(&mut session, payload)
        .await
        .map_err(error_response)?;

    let response = issue_token(&state, session, record).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> StatusCode {
    let mut session = auth_user.session;
    state.directory.logout(&mut session);
    state.sessions.remove(&auth_user.claims.sid).await;
    StatusCode::NO_CONTENT
}

/// Students see their own grades; faculty see the roster
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(current) = auth_user.session.current().cloned() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        ));
    };

    if current.is_faculty() {
        let students = roster(&state).await?;
        return Ok((
            StatusCode::OK,
            Json(json!({
                "view": "faculty",
                "user": StudentInfo::from(current),
                "count": students.len(),
                "students": students,
            })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "view": "student",
            "user": StudentInfo::from(current),
        })),
    ))
}

pub async fn list_students(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let students = roster(&state).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "count": students.len(),
            "students": students,
        })),
    ))
}

async fn roster(state: &AppState) -> Result<Vec<StudentInfo>, ApiError> {
    let students = state
        .directory
        .list_students()
        .await
        .map_err(error_response)?;
    Ok(students.into_iter().map(StudentInfo::from).collect())
}
