//! Domain entities - the core business objects.

mod post;

pub use post::{MAX_AUTHOR_LEN, MAX_TITLE_LEN, MAX_URL_LEN, Post, PostDraft};
