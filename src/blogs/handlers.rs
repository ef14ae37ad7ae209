use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{BlogItem, GenerateBlogRequest, GenerateBlogResponse};
use crate::{
    artifacts::{ArtifactKind, Pagination},
    auth::AuthUser,
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    generation::{generate_and_store, Draft},
    state::AppState,
};

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blog/generateblog", post(generate_blog))
        .route("/blog/history", get(list_blogs).delete(clear_blogs))
        .route("/blog/:id", get(get_blog).delete(delete_blog))
}

#[instrument(skip(state, body))]
pub async fn generate_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<GenerateBlogRequest>,
) -> Result<Json<GenerateBlogResponse>, ApiError> {
    let draft = Draft::validate(
        ArtifactKind::Blog,
        &body.title,
        body.tone.as_deref(),
        body.length,
        body.keywords.as_deref(),
    )?;

    let blog = generate_and_store(&state, user_id, draft).await?;

    Ok(Json(GenerateBlogResponse {
        success: true,
        content: blog.content,
        blog_id: blog.id,
    }))
}

#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<BlogItem>>, ApiError> {
    let (limit, offset) = p.clamped();
    let rows = state
        .artifacts
        .list_by_user(user_id, ArtifactKind::Blog, limit, offset)
        .await?;
    Ok(Json(rows.into_iter().map(BlogItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BlogItem>, ApiError> {
    match state.artifacts.get(user_id, ArtifactKind::Blog, id).await? {
        Some(blog) => Ok(Json(blog.into())),
        None => Err(ApiError::NotFound("Blog not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.artifacts.delete(user_id, ArtifactKind::Blog, id).await? {
        return Err(ApiError::NotFound("Blog not found".into()));
    }
    info!(%user_id, %id, "blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn clear_blogs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.artifacts.clear(user_id, ArtifactKind::Blog).await?;
    info!(%user_id, deleted, "blog history cleared");
    Ok(Json(json!({ "deleted": deleted })))
}
