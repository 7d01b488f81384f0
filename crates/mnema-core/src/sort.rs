//! Sort-type resolution and pagination for word listings.
//!
//! A listing request names one of a fixed vocabulary of views (`SortType`);
//! each view resolves to exactly one primary field/direction pair. The
//! record id is always appended as a secondary key in the same direction so
//! the resulting order is total — ties on the primary field cannot reorder
//! between pages.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SORT TYPES
// =============================================================================

/// Enumerated listing views accepted by the sorted-listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    LeastRevised,
    MostDifficult,
    Normal,
    MostRevised,
    LeastOpened,
    NewestFirst,
    OldestFirst,
    Alphabetical,
    ReverseAlphabetical,
}

impl SortType {
    /// Every supported view, in the order the listing endpoint documents them.
    pub const ALL: [SortType; 9] = [
        SortType::LeastRevised,
        SortType::MostDifficult,
        SortType::Normal,
        SortType::MostRevised,
        SortType::LeastOpened,
        SortType::NewestFirst,
        SortType::OldestFirst,
        SortType::Alphabetical,
        SortType::ReverseAlphabetical,
    ];

    /// The wire token for this view.
    pub fn token(&self) -> &'static str {
        match self {
            SortType::LeastRevised => "least_revised",
            SortType::MostDifficult => "most_difficult",
            SortType::Normal => "normal",
            SortType::MostRevised => "most_revised",
            SortType::LeastOpened => "least_opened",
            SortType::NewestFirst => "newest_first",
            SortType::OldestFirst => "oldest_first",
            SortType::Alphabetical => "alphabetical",
            SortType::ReverseAlphabetical => "reverse_alphabetical",
        }
    }

    /// Human-readable description served by the sorting-types endpoint.
    pub fn description(&self) -> &'static str {
        match self {
            SortType::LeastRevised => "Words revised the fewest times first",
            SortType::MostDifficult => "Words opened the most times first",
            SortType::Normal => "Default order (same as least_revised)",
            SortType::MostRevised => "Words revised the most times first",
            SortType::LeastOpened => "Words opened the fewest times first",
            SortType::NewestFirst => "Most recently added words first",
            SortType::OldestFirst => "Oldest words first",
            SortType::Alphabetical => "A to Z by word text",
            SortType::ReverseAlphabetical => "Z to A by word text",
        }
    }

    /// Resolve this view to its ordering rule.
    pub fn sort_spec(&self) -> SortSpec {
        match self {
            SortType::LeastRevised | SortType::Normal => {
                SortSpec::new(SortKey::RevisionCount, SortDirection::Ascending)
            }
            SortType::MostRevised => {
                SortSpec::new(SortKey::RevisionCount, SortDirection::Descending)
            }
            SortType::MostDifficult => {
                SortSpec::new(SortKey::OpenCount, SortDirection::Descending)
            }
            SortType::LeastOpened => SortSpec::new(SortKey::OpenCount, SortDirection::Ascending),
            SortType::NewestFirst => SortSpec::new(SortKey::CreatedAt, SortDirection::Descending),
            SortType::OldestFirst => SortSpec::new(SortKey::CreatedAt, SortDirection::Ascending),
            SortType::Alphabetical => SortSpec::new(SortKey::WordText, SortDirection::Ascending),
            SortType::ReverseAlphabetical => {
                SortSpec::new(SortKey::WordText, SortDirection::Descending)
            }
        }
    }

    /// Comma-separated list of every valid token, for error messages.
    pub fn valid_tokens() -> String {
        Self::ALL
            .iter()
            .map(|t| t.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SortType {
    type Err = Error;

    /// Case-insensitive token lookup. Unknown tokens fail with the full
    /// valid set in the error detail.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "least_revised" => Ok(SortType::LeastRevised),
            "most_difficult" => Ok(SortType::MostDifficult),
            "normal" => Ok(SortType::Normal),
            "most_revised" => Ok(SortType::MostRevised),
            "least_opened" => Ok(SortType::LeastOpened),
            "newest_first" => Ok(SortType::NewestFirst),
            "oldest_first" => Ok(SortType::OldestFirst),
            "alphabetical" => Ok(SortType::Alphabetical),
            "reverse_alphabetical" => Ok(SortType::ReverseAlphabetical),
            _ => Err(Error::UnsupportedSortType {
                got: s.to_string(),
                valid: Self::valid_tokens(),
            }),
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =============================================================================
// ORDERING SPECIFICATION
// =============================================================================

/// Fields a listing can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    RevisionCount,
    OpenCount,
    CreatedAt,
    WordText,
}

impl SortKey {
    /// Column name in the words table.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::RevisionCount => "no_of_times_revised",
            SortKey::OpenCount => "no_of_times_opened",
            SortKey::CreatedAt => "created_at_utc",
            SortKey::WordText => "word",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A deterministic total ordering: primary key/direction plus the record id
/// as tie-breaker in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// ORDER BY body (without the keyword). Column names come from the
    /// fixed [`SortKey`] vocabulary, never from caller input.
    pub fn order_by_clause(&self) -> String {
        format!(
            "{col} {dir}, id {dir}",
            col = self.key.column(),
            dir = self.direction.sql()
        )
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A validated pagination window: `limit` in 1..=100, `page` >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    page: i64,
}

impl Pagination {
    pub const MIN_LIMIT: i64 = crate::defaults::PAGE_LIMIT_MIN;
    pub const MAX_LIMIT: i64 = crate::defaults::PAGE_LIMIT_MAX;

    /// Validate and construct a window.
    ///
    /// # Errors
    /// `InvalidPagination` when `limit` is outside 1..=100 or `page` < 1.
    pub fn new(limit: i64, page: i64) -> Result<Self> {
        if !(Self::MIN_LIMIT..=Self::MAX_LIMIT).contains(&limit) {
            return Err(Error::InvalidPagination(format!(
                "limit must be between {} and {}, got {}",
                Self::MIN_LIMIT,
                Self::MAX_LIMIT,
                limit
            )));
        }
        if page < 1 {
            return Err(Error::InvalidPagination(format!(
                "page must be >= 1, got {}",
                page
            )));
        }
        Ok(Self { limit, page })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Records to skip: (page - 1) * limit. Saturates rather than
    /// overflowing when the page number is absurdly large; a saturated
    /// offset is past the end of any collection, so the page comes back
    /// empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// ceil(total / limit). Zero records means zero pages.
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_token_resolves() {
        for sort_type in SortType::ALL {
            assert_eq!(sort_type.token().parse::<SortType>().unwrap(), sort_type);
        }
    }

    #[test]
    fn test_token_lookup_is_case_insensitive() {
        assert_eq!(
            "ALPHABETICAL".parse::<SortType>().unwrap(),
            SortType::Alphabetical
        );
        assert_eq!(
            "NeWeSt_FiRsT".parse::<SortType>().unwrap(),
            SortType::NewestFirst
        );
    }

    #[test]
    fn test_unknown_token_lists_valid_set() {
        let err = "fastest".parse::<SortType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fastest"));
        for sort_type in SortType::ALL {
            assert!(
                msg.contains(sort_type.token()),
                "error message should list {}",
                sort_type.token()
            );
        }
    }

    #[test]
    fn test_normal_aliases_least_revised() {
        assert_eq!(
            SortType::Normal.sort_spec(),
            SortType::LeastRevised.sort_spec()
        );
        assert_eq!(
            SortType::Normal.sort_spec(),
            SortSpec::new(SortKey::RevisionCount, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_primary_field_and_direction_table() {
        let cases = [
            (SortType::LeastRevised, SortKey::RevisionCount, SortDirection::Ascending),
            (SortType::MostRevised, SortKey::RevisionCount, SortDirection::Descending),
            (SortType::MostDifficult, SortKey::OpenCount, SortDirection::Descending),
            (SortType::LeastOpened, SortKey::OpenCount, SortDirection::Ascending),
            (SortType::NewestFirst, SortKey::CreatedAt, SortDirection::Descending),
            (SortType::OldestFirst, SortKey::CreatedAt, SortDirection::Ascending),
            (SortType::Alphabetical, SortKey::WordText, SortDirection::Ascending),
            (SortType::ReverseAlphabetical, SortKey::WordText, SortDirection::Descending),
        ];
        for (sort_type, key, direction) in cases {
            let spec = sort_type.sort_spec();
            assert_eq!(spec.key, key, "{} primary key", sort_type);
            assert_eq!(spec.direction, direction, "{} direction", sort_type);
        }
    }

    #[test]
    fn test_order_by_clause_ties_on_id_same_direction() {
        let asc = SortSpec::new(SortKey::RevisionCount, SortDirection::Ascending);
        assert_eq!(asc.order_by_clause(), "no_of_times_revised ASC, id ASC");

        let desc = SortSpec::new(SortKey::WordText, SortDirection::Descending);
        assert_eq!(desc.order_by_clause(), "word DESC, id DESC");
    }

    #[test]
    fn test_pagination_rejects_out_of_range_limit() {
        assert!(Pagination::new(0, 1).is_err());
        assert!(Pagination::new(101, 1).is_err());
        assert!(Pagination::new(-5, 1).is_err());
        assert!(Pagination::new(1, 1).is_ok());
        assert!(Pagination::new(100, 1).is_ok());
    }

    #[test]
    fn test_pagination_rejects_nonpositive_page() {
        assert!(Pagination::new(10, 0).is_err());
        assert!(Pagination::new(10, -1).is_err());
        assert!(Pagination::new(10, 1).is_ok());
    }

    #[test]
    fn test_pagination_limit_error_names_bounds() {
        let err = Pagination::new(101, 1).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('1') && msg.contains("100"), "got: {}", msg);
    }

    #[test]
    fn test_offset_math() {
        assert_eq!(Pagination::new(10, 1).unwrap().offset(), 0);
        assert_eq!(Pagination::new(10, 3).unwrap().offset(), 20);
        assert_eq!(Pagination::new(25, 4).unwrap().offset(), 75);
    }

    #[test]
    fn test_offset_saturates_on_huge_page_number() {
        let page = Pagination::new(100, i64::MAX).unwrap();
        assert_eq!(page.offset(), i64::MAX);
        assert!(page.offset() >= 0, "offset must never wrap negative");
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let page = Pagination::new(10, 1).unwrap();
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(page.total_pages(99), 10);
    }
}
