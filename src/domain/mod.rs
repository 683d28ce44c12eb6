mod article;
mod post;

pub use article::Article;
pub use post::{Attachment, Post};
