use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Post repository.
///
/// Reads see committed data only. Writes are staged on the owning
/// [`DataContext`] and take effect when [`ChangeTracker::save`] runs.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, in the store's natural order.
    async fn get_all_posts(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its external `url` key.
    async fn get_post_by_url(&self, url: &str) -> Result<Option<Post>, RepoError>;

    /// Stage a new post.
    async fn create(&self, post: Post) -> Result<(), RepoError>;

    /// Stage a full replacement of the post with the same id.
    async fn update(&self, post: Post) -> Result<(), RepoError>;

    /// Stage removal of the post with the same id.
    async fn delete(&self, post: Post) -> Result<(), RepoError>;
}

/// Commit step for staged repository writes.
#[async_trait]
pub trait ChangeTracker: Send + Sync {
    /// Apply every staged write, all or none.
    /// Returns the number of writes committed.
    async fn save(&self) -> Result<usize, RepoError>;
}

/// A unit of work: one repository view plus the tracker that commits it.
pub trait DataContext: ChangeTracker {
    fn posts(&self) -> &dyn PostRepository;
}

/// Source of per-request data contexts.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn open(&self) -> Result<Box<dyn DataContext>, RepoError>;
}
