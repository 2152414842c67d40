use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};

use spatium_core::model::Post;

use crate::{handlers::AppError, models::CreatePost, state::AppState};

/// List all posts (GET /api/posts).
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.find_all().await?;
    Ok(Json(posts))
}

/// Create a new post (POST /api/posts).
///
/// Responds with the full post list, including the new post.
pub async fn create_post(
    State(state): State<AppState>,
    Form(payload): Form<CreatePost>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Post title is required").into_response());
    }

    let post = payload.into_post();
    state.posts.add(&post).await?;

    let posts = state.posts.find_all().await?;
    Ok((StatusCode::CREATED, Json(posts)).into_response())
}

/// Get a single post by ID (GET /api/posts/{id}).
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state.posts.get_by_id(&id).await?;
    Ok(Json(post))
}
