use serde::Deserialize;

use spatium_core::model::Post;

/// Request payload for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    "anonymous".to_string()
}

impl CreatePost {
    /// Converts the create request into a Post.
    pub fn into_post(self) -> Post {
        Post::new(self.title, self.content, self.author)
    }
}
