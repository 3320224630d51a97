//! In-memory post store - used when no database is configured.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkwell_core::domain::Post;
use inkwell_core::error::RepoError;
use inkwell_core::ports::{ChangeTracker, DataContext, DataStore, PostRepository};

use super::changes::{ChangeSet, PendingChange};

/// In-memory post collection, kept in insertion order.
///
/// Cloning shares the same collection.
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for InMemoryPostStore {
    async fn open(&self) -> Result<Box<dyn DataContext>, RepoError> {
        Ok(Box::new(InMemoryDataContext {
            posts: Arc::clone(&self.posts),
            changes: ChangeSet::default(),
        }))
    }
}

struct InMemoryDataContext {
    posts: Arc<RwLock<Vec<Post>>>,
    changes: ChangeSet,
}

#[async_trait]
impl PostRepository for InMemoryDataContext {
    async fn get_all_posts(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn get_post_by_url(&self, url: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.url == url).cloned())
    }

    async fn create(&self, post: Post) -> Result<(), RepoError> {
        self.changes.stage(PendingChange::Create(post)).await;
        Ok(())
    }

    async fn update(&self, post: Post) -> Result<(), RepoError> {
        self.changes.stage(PendingChange::Update(post)).await;
        Ok(())
    }

    async fn delete(&self, post: Post) -> Result<(), RepoError> {
        self.changes.stage(PendingChange::Delete(post)).await;
        Ok(())
    }
}

#[async_trait]
impl ChangeTracker for InMemoryDataContext {
    async fn save(&self) -> Result<usize, RepoError> {
        let pending = self.changes.take().await;
        if pending.is_empty() {
            return Ok(0);
        }

        let count = pending.len();
        let mut posts = self.posts.write().await;

        // Apply to a copy so a failing change leaves the store untouched.
        let mut next = posts.clone();
        for change in pending {
            apply(&mut next, change)?;
        }
        *posts = next;

        tracing::debug!(changes = count, "Committed post changes in memory");
        Ok(count)
    }
}

impl DataContext for InMemoryDataContext {
    fn posts(&self) -> &dyn PostRepository {
        self
    }
}

fn apply(posts: &mut Vec<Post>, change: PendingChange) -> Result<(), RepoError> {
    match change {
        PendingChange::Create(post) => {
            if posts.iter().any(|p| p.url == post.url || p.id == post.id) {
                return Err(RepoError::Constraint(format!(
                    "Post url '{}' already exists",
                    post.url
                )));
            }
            posts.push(post);
        }
        PendingChange::Update(post) => {
            if posts.iter().any(|p| p.url == post.url && p.id != post.id) {
                return Err(RepoError::Constraint(format!(
                    "Post url '{}' already exists",
                    post.url
                )));
            }
            let slot = posts
                .iter_mut()
                .find(|p| p.id == post.id)
                .ok_or(RepoError::NotFound)?;
            *slot = post;
        }
        PendingChange::Delete(post) => {
            let index = posts
                .iter()
                .position(|p| p.id == post.id)
                .ok_or(RepoError::NotFound)?;
            posts.remove(index);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_core::domain::PostDraft;

    fn post(url: &str, title: &str) -> Post {
        Post::new(PostDraft {
            url: url.to_string(),
            title: title.to_string(),
            description: None,
            content: String::new(),
            author: None,
        })
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();

        assert!(ctx.posts().get_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_is_invisible_until_saved() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();

        ctx.posts().create(post("a", "T")).await.unwrap();
        assert!(ctx.posts().get_post_by_url("a").await.unwrap().is_none());

        assert_eq!(ctx.save().await.unwrap(), 1);
        let found = ctx.posts().get_post_by_url("a").await.unwrap().unwrap();
        assert_eq!(found.title, "T");
    }

    #[tokio::test]
    async fn test_contexts_share_committed_data() {
        let store = InMemoryPostStore::new();

        let writer = store.open().await.unwrap();
        writer.posts().create(post("a", "T")).await.unwrap();
        writer.save().await.unwrap();

        let reader = store.open().await.unwrap();
        assert!(reader.posts().get_post_by_url("a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();

        for url in ["first", "second", "third"] {
            ctx.posts().create(post(url, "T")).await.unwrap();
        }
        ctx.save().await.unwrap();

        let urls: Vec<String> = ctx
            .posts()
            .get_all_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.url)
            .collect();
        assert_eq!(urls, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_duplicate_url_rejects_whole_save() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();
        ctx.posts().create(post("a", "T")).await.unwrap();
        ctx.save().await.unwrap();

        ctx.posts().create(post("b", "B")).await.unwrap();
        ctx.posts().create(post("a", "Again")).await.unwrap();
        let result = ctx.save().await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(ctx.posts().get_post_by_url("b").await.unwrap().is_none());
        assert_eq!(ctx.posts().get_all_posts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_post() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();
        ctx.posts().create(post("a", "T")).await.unwrap();
        ctx.save().await.unwrap();

        let mut existing = ctx.posts().get_post_by_url("a").await.unwrap().unwrap();
        existing.title = "T2".to_string();
        ctx.posts().update(existing.clone()).await.unwrap();
        ctx.save().await.unwrap();

        let found = ctx.posts().get_post_by_url("a").await.unwrap().unwrap();
        assert_eq!(found, existing);
    }

    #[tokio::test]
    async fn test_update_of_missing_post_fails() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();

        ctx.posts().update(post("ghost", "T")).await.unwrap();

        assert!(matches!(ctx.save().await, Err(RepoError::NotFound)));
        assert!(ctx.posts().get_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();
        ctx.posts().create(post("a", "T")).await.unwrap();
        ctx.save().await.unwrap();

        let existing = ctx.posts().get_post_by_url("a").await.unwrap().unwrap();
        ctx.posts().delete(existing).await.unwrap();
        ctx.save().await.unwrap();

        assert!(ctx.posts().get_post_by_url("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_without_changes() {
        let store = InMemoryPostStore::new();
        let ctx = store.open().await.unwrap();

        assert_eq!(ctx.save().await.unwrap(), 0);
    }
}
