mod types;

pub use types::{Comment, Post};
