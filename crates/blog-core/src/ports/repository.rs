use async_trait::async_trait;

use crate::domain::{Post, PostDraft, Theme, ThemeDraft};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `T` is the stored entity, `D` its validated mutable fields.
#[async_trait]
pub trait BaseRepository<T, D, ID>: Send + Sync {
    /// All entities, in store order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity; the store assigns its id.
    async fn create(&self, draft: D) -> Result<T, RepoError>;

    /// Replace every mutable field of an existing entity.
    ///
    /// Fails with `RepoError::NotFound` when no entity has this id.
    async fn update(&self, id: ID, draft: D) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Theme repository.
pub trait ThemeRepository: BaseRepository<Theme, ThemeDraft, i32> {}

/// Post repository.
///
/// Creating or updating a post whose creator or theme does not exist fails
/// with `RepoError::InvalidReference`.
pub trait PostRepository: BaseRepository<Post, PostDraft, i32> {}
