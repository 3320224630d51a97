//! PostgreSQL post store.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use inkwell_core::domain::Post;
use inkwell_core::error::RepoError;
use inkwell_core::ports::{ChangeTracker, DataContext, DataStore, PostRepository};

use super::changes::{ChangeSet, PendingChange};
use super::entity::post::{self, Entity as PostEntity};

/// Post store over a SeaORM connection pool.
#[derive(Clone)]
pub struct PostgresPostStore {
    db: Arc<DbConn>,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[async_trait]
impl DataStore for PostgresPostStore {
    async fn open(&self) -> Result<Box<dyn DataContext>, RepoError> {
        Ok(Box::new(PostgresDataContext {
            db: Arc::clone(&self.db),
            changes: ChangeSet::default(),
        }))
    }
}

/// Reads go straight to the pool; staged writes are committed in one
/// transaction by `save`.
struct PostgresDataContext {
    db: Arc<DbConn>,
    changes: ChangeSet,
}

#[async_trait]
impl PostRepository for PostgresDataContext {
    async fn get_all_posts(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn get_post_by_url(&self, url: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(url = %url, "Finding post by url");

        let result = PostEntity::find()
            .filter(post::Column::Url.eq(url))
            .one(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
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
impl ChangeTracker for PostgresDataContext {
    async fn save(&self) -> Result<usize, RepoError> {
        let pending = self.changes.take().await;
        if pending.is_empty() {
            return Ok(0);
        }

        let count = pending.len();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        // Dropping `txn` on an early return rolls it back.
        for change in pending {
            apply(&txn, change).await?;
        }

        txn.commit().await.map_err(write_error)?;
        tracing::debug!(changes = count, "Committed post changes");

        Ok(count)
    }
}

impl DataContext for PostgresDataContext {
    fn posts(&self) -> &dyn PostRepository {
        self
    }
}

async fn apply(txn: &DatabaseTransaction, change: PendingChange) -> Result<(), RepoError> {
    match change {
        PendingChange::Create(record) => {
            post::ActiveModel::from(record)
                .insert(txn)
                .await
                .map_err(write_error)?;
        }
        PendingChange::Update(record) => {
            post::ActiveModel::from(record)
                .update(txn)
                .await
                .map_err(write_error)?;
        }
        PendingChange::Delete(record) => {
            let result = PostEntity::delete_by_id(record.id)
                .exec(txn)
                .await
                .map_err(write_error)?;

            if result.rows_affected == 0 {
                return Err(RepoError::NotFound);
            }
        }
    }
    Ok(())
}

fn write_error(e: DbErr) -> RepoError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return RepoError::NotFound;
    }

    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Post url already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}
