mod comment;
mod post;

pub use comment::CreateComment;
pub use post::CreatePost;
