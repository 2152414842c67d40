use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};

use spatium_core::model::Comment;

use crate::{handlers::AppError, models::CreateComment, state::AppState};

/// List the comments of a post (GET /api/posts/{id}/comments).
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.posts.comments_for(&post_id).await?;
    Ok(Json(comments))
}

/// Comment on a post (POST /api/posts/{id}/comments).
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Form(payload): Form<CreateComment>,
) -> Result<impl IntoResponse, AppError> {
    let comment = payload.into_comment(post_id);
    state.posts.add_comment(&comment).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
