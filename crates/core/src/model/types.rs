use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{Entity, FieldDef, FieldKind};

/// A published post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Post {
    /// Creates a new post with a fresh ID, stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Sets a specific ID for this post (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl Entity for Post {
    const TABLE_NAME: &'static str = "Post";
    const KEY_FIELD: &'static str = "id";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::String),
        FieldDef::new("title", FieldKind::String),
        FieldDef::new("content", FieldKind::String),
        FieldDef::new("author", FieldKind::String),
        FieldDef::new("createdAt", FieldKind::Number),
    ];

    fn key_value(&self) -> String {
        self.id.clone()
    }
}

/// A comment attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub text: String,
}

impl Comment {
    pub fn new(post_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.into(),
            text: text.into(),
        }
    }
}

impl Entity for Comment {
    const TABLE_NAME: &'static str = "Comment";
    const KEY_FIELD: &'static str = "id";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", FieldKind::String),
        FieldDef::new("postId", FieldKind::String),
        FieldDef::new("text", FieldKind::String),
    ];

    fn key_value(&self) -> String {
        self.id.clone()
    }
}
