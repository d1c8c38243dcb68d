use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an author account.
///
/// The email is stored lowercase-normalized; uniqueness is enforced by the
/// storage layer. `password_hash` never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    /// The email is normalized on the way in.
    pub fn new(name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: Self::normalize_email(email),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form used for storage and lookup: trimmed, lowercased.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email_on_creation() {
        let user = User::new("Ada".into(), "  Ada@Example.COM ", "hash".into());
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn case_variants_normalize_to_same_email() {
        assert_eq!(
            User::normalize_email("Reader@Mail.org"),
            User::normalize_email("reader@mail.ORG")
        );
    }
}
