//! Lenient `page`/`limit` query handling.

/// Resolved page window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;

    /// Missing, non-numeric and non-positive values fall back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(default_limit),
        }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Driver limit value.
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Number of pages for `total` items, never less than 1.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit).max(1)
    }
}

/// Leading-integer parse: `"2"`, `" 3 "` and `"4abc"` are accepted, `"0"`
/// and `"-1"` are not.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().ok().filter(|value| *value > 0)
}

/// `true` when `order` asks for ascending order. Anything else is descending.
pub fn is_ascending(order: Option<&str>) -> bool {
    order.is_some_and(|o| o.trim().eq_ignore_ascii_case("asc"))
}
