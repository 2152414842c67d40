use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        comments::{create_comment, list_comments},
        health::{healthz, livez},
        posts::{create_post, get_post, list_posts},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_state() -> AppState {
        let config = Config {
            worker_count: 2,
            worker_queue_depth: 16,
            scan_page_size: 2,
            table_prefix: String::new(),
            seed_demo_data: false,
            dynamodb_endpoint: None,
        };
        AppState::in_memory(&config).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_form(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(test_state());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_reports_pool() {
        let app = create_app(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["pool"]["worker_count"], 2);
    }

    #[tokio::test]
    async fn test_list_posts_empty() {
        let app = create_app(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_returns_all_posts() {
        let app = create_app(test_state());

        for body in [
            "title=First&author=ana",
            "title=Second&author=ben",
            "title=Third",
        ] {
            let response = app
                .clone()
                .oneshot(post_form("/api/posts", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Three posts span two scan pages of size 2
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let posts = json.as_array().unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts
            .iter()
            .any(|p| p["title"] == "Third" && p["author"] == "anonymous"));
    }

    #[tokio::test]
    async fn test_create_post_requires_title() {
        let app = create_app(test_state());

        let response = app
            .oneshot(post_form("/api/posts", "title=%20&content=empty"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let app = create_app(test_state());

        let response = app
            .clone()
            .oneshot(post_form("/api/posts", "title=Hello&content=World"))
            .await
            .unwrap();

        let json = body_json(response).await;
        let post_id = json[0]["id"].as_str().unwrap().to_string();
        assert!(json[0]["createdAt"].as_i64().unwrap() > 0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/posts/{post_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let post = body_json(response).await;
        assert_eq!(post["title"], "Hello");
        assert_eq!(post["content"], "World");
    }

    #[tokio::test]
    async fn test_get_nonexistent_post() {
        let app = create_app(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_comments_flow() {
        let app = create_app(test_state());

        let response = app
            .clone()
            .oneshot(post_form("/api/posts", "title=Discuss"))
            .await
            .unwrap();
        let json = body_json(response).await;
        let post_id = json[0]["id"].as_str().unwrap().to_string();

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(post_form(&format!("/api/posts/{post_id}/comments"), "text=hi"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);

            let comment = body_json(response).await;
            assert_eq!(comment["postId"], post_id.as_str());
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/posts/{post_id}/comments"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let comments = json.as_array().unwrap();
        assert_eq!(comments.len(), 3);
        assert!(comments.iter().all(|c| c["text"] == "hi"));
    }

    #[tokio::test]
    async fn test_comment_on_unknown_post() {
        let app = create_app(test_state());

        let response = app
            .oneshot(post_form("/api/posts/missing/comments", "text=hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
