use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, PageRequest, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are deliberately separate: an insert that collides
/// with a unique constraint is a `Constraint` error, an update of a missing
/// row is `NotFound`.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup for resolving author summaries.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories, name ascending.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    /// Case-insensitive lookup by normalized name.
    async fn find_by_normalized(&self, name_norm: &str) -> Result<Option<Category>, RepoError>;

    /// Batch lookup for resolving category summaries.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;
}

/// Post repository, including the embedded comment list.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of posts, most recent first (ties keep insertion order),
    /// optionally restricted to a category.
    async fn find_page(
        &self,
        page: PageRequest,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Comments of a post in insertion order.
    async fn comments_of(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Append a comment to its post.
    async fn append_comment(&self, comment: Comment) -> Result<Comment, RepoError>;
}
