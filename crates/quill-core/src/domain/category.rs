use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Category entity - a named grouping for posts.
///
/// Names are unique case-insensitively across the whole registry. The
/// normalized form (`name_norm`) is what the storage layer keys its unique
/// constraint on; `name` keeps the casing the creator typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub name_norm: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category from a raw (untrimmed) name.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name_norm: Self::normalize_name(&name),
            name,
            created_at: Utc::now(),
        })
    }

    /// Rename in place, keeping id and creation time.
    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        let name = Self::validate_name(name)?;
        self.name_norm = Self::normalize_name(&name);
        self.name = name;
        Ok(())
    }

    /// Canonical form for uniqueness checks: trimmed, lowercased.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Category name is required".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_display_casing_but_normalizes() {
        let cat = Category::new(" Tech ").unwrap();
        assert_eq!(cat.name, "Tech");
        assert_eq!(cat.name_norm, "tech");
    }

    #[test]
    fn case_variants_share_a_normalized_name() {
        assert_eq!(
            Category::normalize_name("Tech"),
            Category::normalize_name("tECH")
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            Category::new("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rename_updates_both_forms() {
        let mut cat = Category::new("Tech").unwrap();
        cat.rename("Science").unwrap();
        assert_eq!(cat.name, "Science");
        assert_eq!(cat.name_norm, "science");
    }
}
