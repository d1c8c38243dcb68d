#[cfg(test)]
mod tests {
    use crate::database::entity::{category, post};
    use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};
    use quill_core::domain::{Category, Post};
    use quill_core::ports::{BaseRepository, CategoryRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let category_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                category_id: Some(category_id),
                title: "Test Post".to_owned(),
                content: "Content long enough to be real".to_owned(),
                excerpt: None,
                featured_image: "default-post.jpg".to_owned(),
                published: true,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.category_id, Some(category_id));
    }

    #[tokio::test]
    async fn test_find_category_by_normalized_name() {
        let category_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: category_id,
                name: "Tech".to_owned(),
                name_norm: "tech".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_normalized("tech").await.unwrap();

        let category = result.unwrap();
        assert_eq!(category.name, "Tech");
        assert_eq!(category.name_norm, "tech");
    }
}
