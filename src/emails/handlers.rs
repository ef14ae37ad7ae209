use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{EmailItem, GenerateEmailRequest, GenerateEmailResponse};
use crate::{
    artifacts::{ArtifactKind, Pagination},
    auth::AuthUser,
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    generation::{generate_and_store, Draft},
    state::AppState,
};

pub fn email_routes() -> Router<AppState> {
    Router::new()
        .route("/email/generateemail", post(generate_email))
        .route("/email/history", get(list_emails).delete(clear_emails))
        .route("/email/:id", get(get_email).delete(delete_email))
}

#[instrument(skip(state, body))]
pub async fn generate_email(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<GenerateEmailRequest>,
) -> Result<Json<GenerateEmailResponse>, ApiError> {
    let draft = Draft::validate(
        ArtifactKind::Email,
        &body.subject,
        body.tone.as_deref(),
        body.length,
        body.context.as_deref(),
    )?;

    let email = generate_and_store(&state, user_id, draft).await?;

    Ok(Json(GenerateEmailResponse {
        success: true,
        content: email.content,
        email_id: email.id,
    }))
}

#[instrument(skip(state))]
pub async fn list_emails(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<EmailItem>>, ApiError> {
    let (limit, offset) = p.clamped();
    let rows = state
        .artifacts
        .list_by_user(user_id, ArtifactKind::Email, limit, offset)
        .await?;
    Ok(Json(rows.into_iter().map(EmailItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_email(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<EmailItem>, ApiError> {
    state
        .artifacts
        .get(user_id, ArtifactKind::Email, id)
        .await?
        .map(|a| Json(a.into()))
        .ok_or_else(|| ApiError::NotFound("Email not found".into()))
}

#[instrument(skip(state))]
pub async fn delete_email(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.artifacts.delete(user_id, ArtifactKind::Email, id).await? {
        info!(%user_id, %id, "email deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Email not found".into()))
    }
}

#[instrument(skip(state))]
pub async fn clear_emails(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.artifacts.clear(user_id, ArtifactKind::Email).await?;
    info!(%user_id, deleted, "email history cleared");
    Ok(Json(json!({ "deleted": deleted })))
}
