use crate::error::DomainError;

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// A validated, 1-based page request.
///
/// Out-of-range pages are a repository concern (they yield an empty list);
/// a page or size below 1 is caller error and is rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::Validation("page must be at least 1".to_string()));
        }
        if page_size < 1 {
            return Err(DomainError::Validation(
                "pageSize must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    /// Build from optional query parameters, applying defaults.
    pub fn from_params(page: Option<u64>, page_size: Option<u64>) -> Result<Self, DomainError> {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let req = PageRequest::from_params(None, None).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn zero_page_is_rejected() {
        assert!(PageRequest::from_params(Some(0), None).is_err());
        assert!(PageRequest::from_params(None, Some(0)).is_err());
    }

    #[test]
    fn offset_is_one_based() {
        let req = PageRequest::new(2, 6).unwrap();
        assert_eq!(req.offset(), 6);
    }
}
