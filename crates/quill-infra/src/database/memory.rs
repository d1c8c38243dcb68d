//! In-memory repositories - used as fallback when no database is configured.
//!
//! A single `InMemoryStore` holds all tables behind one async `RwLock`, so
//! cross-entity rules (category deletion clearing post references, post
//! deletion dropping comments) mirror what the SQL schema does with
//! foreign-key actions. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Comment, PageRequest, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, UserRepository,
};

#[derive(Default)]
struct StoreInner {
    users: Vec<User>,
    categories: Vec<Category>,
    /// Kept in insertion order - the tie-break for equal timestamps.
    posts: Vec<Post>,
    comments: HashMap<Uuid, Vec<Comment>>,
}

/// Shared in-memory state behind the per-entity repository views.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut inner = self.store.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut inner = self.store.inner.write().await;
        match inner.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.store.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        let mut inner = self.store.inner.write().await;
        if inner
            .categories
            .iter()
            .any(|c| c.name_norm == category.name_norm)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, RepoError> {
        let mut inner = self.store.inner.write().await;
        if inner
            .categories
            .iter()
            .any(|c| c.id != category.id && c.name_norm == category.name_norm)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        match inner.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => {
                *slot = category.clone();
                Ok(category)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.store.inner.write().await;
        let before = inner.categories.len();
        inner.categories.retain(|c| c.id != id);
        if inner.categories.len() == before {
            return Err(RepoError::NotFound);
        }
        // Mirror of the SQL ON DELETE SET NULL on posts.category_id.
        for post in inner.posts.iter_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let inner = self.store.inner.read().await;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name_norm.cmp(&b.name_norm));
        Ok(categories)
    }

    async fn find_by_normalized(&self, name_norm: &str) -> Result<Option<Category>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .find(|c| c.name_norm == name_norm)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut inner = self.store.inner.write().await;
        if inner.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut inner = self.store.inner.write().await;
        match inner.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.store.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        if inner.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        // Comments share the post's lifetime.
        inner.comments.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        page: PageRequest,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError> {
        let inner = self.store.inner.read().await;
        let mut posts: Vec<Post> = inner
            .posts
            .iter()
            .filter(|p| category_id.is_none() || p.category_id == category_id)
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect())
    }

    async fn comments_of(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let inner = self.store.inner.read().await;
        Ok(inner.comments.get(&post_id).cloned().unwrap_or_default())
    }

    async fn append_comment(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut inner = self.store.inner.write().await;
        inner
            .comments
            .entry(comment.post_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use quill_core::domain::PostDraft;

    fn repos() -> (
        InMemoryUserRepository,
        InMemoryCategoryRepository,
        InMemoryPostRepository,
    ) {
        let store = InMemoryStore::new();
        (
            InMemoryUserRepository::new(store.clone()),
            InMemoryCategoryRepository::new(store.clone()),
            InMemoryPostRepository::new(store),
        )
    }

    fn post(author: Uuid, category: Uuid, title: &str) -> Post {
        let draft = PostDraft::new(
            title,
            "content comfortably over twenty characters",
            None,
            None,
            None,
        )
        .unwrap();
        Post::new(draft, author, category)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (_, _, posts) = repos();
        let created = post(Uuid::new_v4(), Uuid::new_v4(), "Future of Web Dev 2024");
        posts.insert(created.clone()).await.unwrap();

        let fetched = posts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, created.title);
        assert_eq!(fetched.content, created.content);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let (users, _, _) = repos();
        users
            .insert(User::new("A".into(), "same@mail.com", "h1".into()))
            .await
            .unwrap();
        let err = users
            .insert(User::new("B".into(), "Same@Mail.COM", "h2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn category_case_variant_is_a_constraint_violation() {
        let (_, categories, _) = repos();
        categories
            .insert(Category::new("Tech").unwrap())
            .await
            .unwrap();
        let err = categories
            .insert(Category::new("tECH").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_gone() {
        let (_, _, posts) = repos();
        let created = post(Uuid::new_v4(), Uuid::new_v4(), "Short lived");
        posts.insert(created.clone()).await.unwrap();

        posts.delete(created.id).await.unwrap();
        assert!(posts.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            posts.delete(created.id).await.unwrap_err(),
            RepoError::NotFound
        ));
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let (_, _, posts) = repos();
        let author = Uuid::new_v4();
        let category = Uuid::new_v4();
        for i in 0..6 {
            posts
                .insert(post(author, category, &format!("Post number {i}")))
                .await
                .unwrap();
        }

        let page1 = posts
            .find_page(PageRequest::new(1, 6).unwrap(), None)
            .await
            .unwrap();
        let page2 = posts
            .find_page(PageRequest::new(2, 6).unwrap(), None)
            .await
            .unwrap();
        assert_eq!(page1.len(), 6);
        assert!(page2.is_empty());
    }

    #[tokio::test]
    async fn listing_is_newest_first_with_category_filter() {
        let (_, _, posts) = repos();
        let author = Uuid::new_v4();
        let cat_a = Uuid::new_v4();
        let cat_b = Uuid::new_v4();

        let mut old = post(author, cat_a, "Older in A");
        old.created_at = Utc::now() - TimeDelta::hours(1);
        posts.insert(old).await.unwrap();
        posts.insert(post(author, cat_b, "In B")).await.unwrap();
        posts.insert(post(author, cat_a, "Newer in A")).await.unwrap();

        let page = posts
            .find_page(PageRequest::default(), Some(cat_a))
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer in A", "Older in A"]);
    }

    #[tokio::test]
    async fn comments_append_in_order() {
        let (_, _, posts) = repos();
        let created = post(Uuid::new_v4(), Uuid::new_v4(), "With comments");
        posts.insert(created.clone()).await.unwrap();

        for text in ["first", "second", "third"] {
            posts
                .append_comment(Comment::new(created.id, None, text).unwrap())
                .await
                .unwrap();
        }

        let comments = posts.comments_of(created.id).await.unwrap();
        assert_eq!(comments.len(), 3);
        let order: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn deleting_a_category_clears_post_references() {
        let (_, categories, posts) = repos();
        let category = Category::new("Tech").unwrap();
        categories.insert(category.clone()).await.unwrap();

        let created = post(Uuid::new_v4(), category.id, "Dangling soon");
        posts.insert(created.clone()).await.unwrap();

        categories.delete(category.id).await.unwrap();

        let fetched = posts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.category_id, None);
    }

    #[tokio::test]
    async fn rename_to_existing_name_is_rejected() {
        let (_, categories, _) = repos();
        let tech = Category::new("Tech").unwrap();
        let mut science = Category::new("Science").unwrap();
        categories.insert(tech).await.unwrap();
        categories.insert(science.clone()).await.unwrap();

        science.rename("tech").unwrap();
        let err = categories.update(science).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }
}
