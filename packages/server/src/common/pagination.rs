//! Offset-based pagination types
//!
//! Pages are 1-based: page `n` of size `s` starts at row `(n - 1) * s`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let args = PageArgs { page_number: Some(2), page_size: Some(10) };
//! let validated = args.validate()?;
//!
//! // In the store
//! let reviews = store.list_reviews_by_user(user_id, validated.offset(), validated.limit()).await?;
//! ```

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a single request may fetch.
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Input arguments for offset-based pagination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageArgs {
    /// 1-based page number (defaults to 1).
    pub page_number: Option<i64>,
    /// Number of rows per page (defaults to 10, at most 100).
    pub page_size: Option<i64>,
}

impl PageArgs {
    /// Create args for a specific page.
    pub fn new(page_number: i64, page_size: i64) -> Self {
        PageArgs {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Validate pagination arguments.
    ///
    /// Returns validated args with defaults applied. Page sizes outside
    /// `1..=MAX_PAGE_SIZE` are rejected.
    pub fn validate(&self) -> Result<ValidatedPageArgs, &'static str> {
        let page_number = self.page_number.unwrap_or(1);
        if page_number < 1 {
            return Err("page_number must be at least 1");
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size < 1 {
            return Err("page_size must be at least 1");
        }
        if page_size > MAX_PAGE_SIZE {
            return Err("page_size must be at most 100");
        }

        Ok(ValidatedPageArgs {
            page_number,
            page_size,
        })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    /// 1-based page number.
    pub page_number: i64,
    /// Rows per page (1-100).
    pub page_size: i64,
}

impl ValidatedPageArgs {
    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults() {
        let validated = PageArgs::default().validate().unwrap();
        assert_eq!(validated.page_number, 1);
        assert_eq!(validated.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(validated.offset(), 0);
    }

    #[test]
    fn test_offset_for_second_page() {
        let validated = PageArgs::new(2, 10).validate().unwrap();
        assert_eq!(validated.offset(), 10);
        assert_eq!(validated.limit(), 10);
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        assert!(PageArgs::new(1, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(PageArgs::new(1, 1000).validate().is_err());

        let validated = PageArgs::new(1, MAX_PAGE_SIZE).validate().unwrap();
        assert_eq!(validated.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_validate_rejects_zero_page() {
        assert!(PageArgs::new(0, 10).validate().is_err());
        assert!(PageArgs::new(-3, 10).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_page_size() {
        assert!(PageArgs::new(1, 0).validate().is_err());
    }
}
