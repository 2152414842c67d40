use serde::Deserialize;

use spatium_core::model::Comment;

/// Request payload for commenting on a post.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub text: String,
}

impl CreateComment {
    /// Converts the create request into a Comment on `post_id`.
    pub fn into_comment(self, post_id: impl Into<String>) -> Comment {
        Comment::new(post_id, self.text)
    }
}
