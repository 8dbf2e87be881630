//! Page/limit handling for list queries.

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// A resolved, 1-based page window. Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Zero falls back to the default for that field.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Resolves raw `page` and `limit` query parameters.
    ///
    /// Missing, non-numeric and non-positive values fall back to page 1 and
    /// limit 10. There is no upper bound on `limit`.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`, saturating at `i64::MAX`
    /// because Postgres takes OFFSET as a bigint.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1).saturating_mul(i64::from(self.limit))
    }
}

/// A run of digits above `u32::MAX` clamps to it, however long.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(0) => None,
        Ok(value) => Some(value),
        Err(_) => Some(u32::MAX),
    }
}

/// Appends the row window for `page` to a base query.
pub fn paginate(query: &str, page: Page) -> String {
    format!("{query} LIMIT {} OFFSET {}", page.limit(), page.offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_malformed_values_fall_back_to_defaults() {
        assert_eq!(Page::parse(None, None), Page::new(1, 10));
        assert_eq!(Page::parse(Some(""), Some("")), Page::new(1, 10));
        assert_eq!(Page::parse(Some("abc"), Some("1.5")), Page::new(1, 10));
        assert_eq!(Page::parse(Some("0"), Some("-3")), Page::new(1, 10));
    }

    #[test]
    fn valid_values_are_kept() {
        let page = Page::parse(Some("3"), Some("25"));
        assert_eq!(page.page(), 3);
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn each_field_falls_back_independently() {
        assert_eq!(Page::parse(Some("4"), Some("nope")), Page::new(4, 10));
        assert_eq!(Page::parse(Some("nope"), Some("7")), Page::new(1, 7));
    }

    #[test]
    fn huge_values_clamp_instead_of_overflowing() {
        let page = Page::parse(Some("99999999999"), Some("99999999999"));
        assert_eq!(page.page(), u32::MAX);
        assert_eq!(page.limit(), u32::MAX);
        assert_eq!(page.offset(), i64::MAX);
    }

    #[test]
    fn overflow_clamps_regardless_of_length() {
        let beyond_i64 = "99999999999999999999";
        assert_eq!(Page::parse(Some(beyond_i64), Some(beyond_i64)), Page::new(u32::MAX, u32::MAX));
        assert_eq!(Page::parse(Some("4294967296"), None), Page::new(u32::MAX, 10));
        assert_eq!(Page::parse(Some("00000000000000000000000"), None), Page::new(1, 10));
        assert_eq!(Page::parse(Some("-99999999999999999999"), None), Page::new(1, 10));
    }

    #[test]
    fn paginate_appends_limit_and_offset() {
        assert_eq!(
            paginate("SELECT * FROM circuits", Page::new(1, 10)),
            "SELECT * FROM circuits LIMIT 10 OFFSET 0"
        );
        assert_eq!(
            paginate("SELECT * FROM circuits", Page::new(2, 10)),
            "SELECT * FROM circuits LIMIT 10 OFFSET 10"
        );
    }
}
