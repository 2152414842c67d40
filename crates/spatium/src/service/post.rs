//! Post and comment operations composed from repository builders.

use std::sync::Arc;

use spatium_core::model::{Comment, Post};
use spatium_core::storage::{
    collect_all, Filter, PaginatedScanner, Repository, RepositoryError, Result, StoreClient,
};
use tokio::sync::watch;

/// Application-facing operations over posts and their comments.
pub struct PostService {
    store: Arc<dyn StoreClient>,
    posts: Repository<Post>,
    comments: Repository<Comment>,
    scanner: PaginatedScanner,
}

impl PostService {
    pub fn new(
        store: Arc<dyn StoreClient>,
        posts: Repository<Post>,
        comments: Repository<Comment>,
    ) -> Self {
        let scanner = PaginatedScanner::new(Arc::clone(&store));
        Self {
            store,
            posts,
            comments,
            scanner,
        }
    }

    /// Ends open list scans before their next page once shutdown is signalled.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.scanner = self.scanner.with_shutdown(shutdown);
        self
    }

    /// Lists every post, in store order.
    pub async fn find_all(&self) -> Result<Vec<Post>> {
        let posts = collect_all(self.scanner.scan_table(&self.posts)).await?;
        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Fetches one post by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Post> {
        let item = self.store.get(self.posts.build_get(id)).await?;
        match item {
            Some(item) => self.posts.decode(&item),
            None => Err(RepositoryError::NotFound {
                entity_type: "Post",
                id: id.to_string(),
            }),
        }
    }

    pub async fn add(&self, post: &Post) -> Result<()> {
        let request = self.posts.build_put(post)?;
        self.store.put(request).await?;
        tracing::info!(post_id = %post.id, title = %post.title, "Created new post");
        Ok(())
    }

    /// Lists the comments of a post via a filtered full-table scan.
    pub async fn comments_for(&self, post_id: &str) -> Result<Vec<Comment>> {
        let stream = self
            .scanner
            .scan_all(&self.comments, Filter::eq("postId", post_id))?;
        collect_all(stream).await
    }

    /// Stores a comment after checking that its post exists.
    pub async fn add_comment(&self, comment: &Comment) -> Result<()> {
        self.get_by_id(&comment.post_id).await?;

        let request = self.comments.build_put(comment)?;
        self.store.put(request).await?;
        tracing::info!(comment_id = %comment.id, post_id = %comment.post_id, "Created new comment");
        Ok(())
    }
}
