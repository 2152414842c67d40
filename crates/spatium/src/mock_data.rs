use spatium_core::model::{Comment, Post};
use spatium_core::storage::Result;

use crate::service::PostService;

/// Demo posts with the comments attached to each.
const DEMO_POSTS: &[(&str, &str, &str, &[&str])] = &[
    (
        "Welcome to Spatium",
        "Posts and comments live in two flat tables.",
        "admin",
        &["First!", "Nice and simple."],
    ),
    (
        "Paginated scans",
        "Listing comments walks every page until the cursor runs out.",
        "ana",
        &["How big is a page?", "SCAN_PAGE_SIZE, 100 by default."],
    ),
    (
        "Running on DynamoDB",
        "Build with --no-default-features --features dynamodb.",
        "ben",
        &[],
    ),
];

/// Writes the demo posts and comments through the service.
///
/// Returns the number of posts written.
pub async fn seed(service: &PostService) -> Result<usize> {
    for (title, content, author, comments) in DEMO_POSTS {
        let post = Post::new(*title, *content, *author);
        service.add(&post).await?;

        for text in comments.iter() {
            service.add_comment(&Comment::new(&post.id, *text)).await?;
        }
    }

    Ok(DEMO_POSTS.len())
}
