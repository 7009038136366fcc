//! Pagination and date-range parameters for pickup-point listing.

use chrono::{DateTime, Utc};

/// Errors from listing parameter validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Page numbers start at 1.
    #[error("page must be at least 1 (got {0})")]
    InvalidPage(i64),
    /// A page must hold at least one item.
    #[error("limit must be at least 1 (got {0})")]
    InvalidLimit(i64),
    /// The start bound lies after the end bound.
    #[error("startDate must not be after endDate")]
    InvertedRange,
}

/// Offset-based page request.
///
/// `limit` is silently clamped to [`PageRequest::MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page used when none is requested.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Limit used when none is requested.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest limit ever honoured.
    pub const MAX_LIMIT: u32 = 30;

    /// Build a page request, applying defaults and the limit ceiling.
    ///
    /// # Errors
    ///
    /// Returns `ListingError` if `page` or `limit` is below 1.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, ListingError> {
        let page = match page {
            None => Self::DEFAULT_PAGE,
            Some(p) if p < 1 => return Err(ListingError::InvalidPage(p)),
            Some(p) => u32::try_from(p).unwrap_or(u32::MAX),
        };
        let limit = match limit {
            None => Self::DEFAULT_LIMIT,
            Some(l) if l < 1 => return Err(ListingError::InvalidLimit(l)),
            Some(l) => u32::try_from(l).unwrap_or(u32::MAX).min(Self::MAX_LIMIT),
        };
        Ok(Self { page, limit })
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Effective (clamped) page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Inclusive, optionally open-ended time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range; a missing bound means unbounded on that side.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvertedRange` if both bounds are present and
    /// `start > end`.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ListingError> {
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(ListingError::InvertedRange);
        }
        Ok(Self { start, end })
    }

    /// A range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Upper bound, if any.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Whether `at` lies inside the range (bounds inclusive).
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| at >= s) && self.end.is_none_or(|e| at <= e)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = PageRequest::new(None, None).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_limit_is_clamped() {
        let page = PageRequest::new(Some(1), Some(100)).unwrap();
        assert_eq!(page.limit(), 30);
        assert_eq!(page, PageRequest::new(Some(1), Some(30)).unwrap());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(1), Some(10)).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(10)).unwrap().offset(), 20);
        assert_eq!(PageRequest::new(Some(2), Some(100)).unwrap().offset(), 30);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            PageRequest::new(Some(0), None),
            Err(ListingError::InvalidPage(0))
        );
        assert_eq!(
            PageRequest::new(None, Some(-5)),
            Err(ListingError::InvalidLimit(-5))
        );
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let start = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 4, 30, 23, 59, 59).unwrap();
        let range = DateRange::new(Some(start), Some(end)).unwrap();

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(start - chrono::Duration::seconds(1)));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_date_range_open_ended() {
        let at = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert!(DateRange::unbounded().contains(at));

        let only_end = DateRange::new(None, Some(at)).unwrap();
        assert!(only_end.contains(at - chrono::Duration::days(365)));
        assert!(!only_end.contains(at + chrono::Duration::days(1)));
    }

    #[test]
    fn test_date_range_inverted() {
        let a = Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(
            DateRange::new(Some(a), Some(b)),
            Err(ListingError::InvertedRange)
        );
    }
}
