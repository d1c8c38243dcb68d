use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Filename referenced by posts created without an uploaded image.
pub const DEFAULT_FEATURED_IMAGE: &str = "default-post.jpg";

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const CONTENT_MIN: usize = 20;
const EXCERPT_MAX: usize = 200;

/// Post entity - a user-authored article.
///
/// `author_id` is fixed at creation. `category_id` is always set at creation
/// and becomes `None` only when the referenced category is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a post from a validated draft.
    pub fn new(draft: PostDraft, author_id: Uuid, category_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: Some(category_id),
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            featured_image: draft
                .featured_image
                .unwrap_or_else(|| DEFAULT_FEATURED_IMAGE.to_string()),
            published: draft.published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    /// Author and category are deliberately not patchable.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = Some(excerpt);
        }
        if let Some(image) = patch.featured_image {
            self.featured_image = image;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// Comment - append-only sub-entity of a post.
///
/// `author_id` is `None` for anonymous comments. Ordering is insertion order,
/// kept by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment; fails if the content is blank after trimming.
    pub fn new(post_id: Uuid, author_id: Option<Uuid>, content: &str) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::FieldValidation(vec![
                "content is required".to_string(),
            ]));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    title: String,
    content: String,
    excerpt: Option<String>,
    featured_image: Option<String>,
    published: bool,
}

impl PostDraft {
    /// Validate all fields at once, collecting every violation so the caller
    /// can report them together.
    pub fn new(
        title: &str,
        content: &str,
        excerpt: Option<&str>,
        featured_image: Option<String>,
        published: Option<bool>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        let content = content.trim();
        let excerpt = excerpt.map(str::trim).filter(|e| !e.is_empty());

        let mut violations = Vec::new();
        check_title(title, &mut violations);
        check_content(content, &mut violations);
        if let Some(excerpt) = excerpt {
            check_excerpt(excerpt, &mut violations);
        }
        if !violations.is_empty() {
            return Err(DomainError::FieldValidation(violations));
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            excerpt: excerpt.map(str::to_string),
            featured_image,
            published: published.unwrap_or(true),
        })
    }
}

/// Validated partial update for a post. `None` fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    title: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    featured_image: Option<String>,
    published: Option<bool>,
}

impl PostPatch {
    /// Validate only the fields present in the update.
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        excerpt: Option<&str>,
        featured_image: Option<String>,
        published: Option<bool>,
    ) -> Result<Self, DomainError> {
        let title = title.map(str::trim);
        let content = content.map(str::trim);
        let excerpt = excerpt.map(str::trim);

        let mut violations = Vec::new();
        if let Some(title) = title {
            check_title(title, &mut violations);
        }
        if let Some(content) = content {
            check_content(content, &mut violations);
        }
        if let Some(excerpt) = excerpt {
            check_excerpt(excerpt, &mut violations);
        }
        if !violations.is_empty() {
            return Err(DomainError::FieldValidation(violations));
        }

        Ok(Self {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
            excerpt: excerpt.map(str::to_string),
            featured_image,
            published,
        })
    }
}

fn check_title(title: &str, violations: &mut Vec<String>) {
    let len = title.chars().count();
    if len < TITLE_MIN || len > TITLE_MAX {
        violations.push(format!(
            "title must be {TITLE_MIN}-{TITLE_MAX} characters"
        ));
    }
}

fn check_content(content: &str, violations: &mut Vec<String>) {
    if content.chars().count() < CONTENT_MIN {
        violations.push(format!("content must be at least {CONTENT_MIN} characters"));
    }
}

fn check_excerpt(excerpt: &str, violations: &mut Vec<String>) {
    if excerpt.chars().count() > EXCERPT_MAX {
        violations.push(format!("excerpt must be at most {EXCERPT_MAX} characters"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PostDraft {
        PostDraft::new(
            "Future of Web Dev 2024",
            "A body easily longer than twenty characters.",
            None,
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn draft_round_trips_into_post() {
        let author = Uuid::new_v4();
        let category = Uuid::new_v4();
        let post = Post::new(valid_draft(), author, category);

        assert_eq!(post.title, "Future of Web Dev 2024");
        assert_eq!(post.author_id, author);
        assert_eq!(post.category_id, Some(category));
        assert_eq!(post.featured_image, DEFAULT_FEATURED_IMAGE);
        assert!(post.published);
    }

    #[test]
    fn short_title_names_the_field() {
        let err = PostDraft::new("ab", "long enough content for the check", None, None, None)
            .unwrap_err();
        match err {
            DomainError::FieldValidation(fields) => {
                assert_eq!(fields.len(), 1);
                assert!(fields[0].contains("title"));
            }
            other => panic!("expected field validation, got {other:?}"),
        }
    }

    #[test]
    fn collects_every_violation() {
        let long_excerpt = "x".repeat(201);
        let err = PostDraft::new("ab", "too short", Some(&long_excerpt), None, None).unwrap_err();
        match err {
            DomainError::FieldValidation(fields) => {
                assert_eq!(fields.len(), 3);
            }
            other => panic!("expected field validation, got {other:?}"),
        }
    }

    #[test]
    fn patch_leaves_missing_fields_untouched() {
        let mut post = Post::new(valid_draft(), Uuid::new_v4(), Uuid::new_v4());
        let before = post.content.clone();

        let patch = PostPatch::new(Some("Another headline"), None, None, None, Some(false))
            .unwrap();
        post.apply(patch);

        assert_eq!(post.title, "Another headline");
        assert_eq!(post.content, before);
        assert!(!post.published);
    }

    #[test]
    fn patch_validates_present_fields() {
        assert!(PostPatch::new(Some("ab"), None, None, None, None).is_err());
        assert!(PostPatch::new(None, Some("tiny"), None, None, None).is_err());
    }

    #[test]
    fn blank_comment_is_rejected() {
        let err = Comment::new(Uuid::new_v4(), None, "   ").unwrap_err();
        assert!(matches!(err, DomainError::FieldValidation(_)));
    }

    #[test]
    fn anonymous_comment_is_allowed() {
        let comment = Comment::new(Uuid::new_v4(), None, "nice write-up").unwrap();
        assert!(comment.author_id.is_none());
        assert_eq!(comment.content, "nice write-up");
    }
}
