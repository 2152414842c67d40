mod post;

pub use post::PostService;
