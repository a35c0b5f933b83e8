//! Fixed-size paging over ordered question listings.

/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number taken from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(i64);

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl PageRequest {
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Parse the raw `page` parameter.
    ///
    /// Missing or non-integer values fall back to the first page. Integers
    /// too large for `i64` saturate, so they still name a page past the end.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|value| parse_saturating(value.trim()))
            .map_or_else(Self::first, Self)
    }

    #[must_use]
    pub fn number(&self) -> i64 {
        self.0
    }

    /// Half-open `[start, end)` item range for this page.
    ///
    /// Returns `None` for pages below 1 or ranges that overflow `usize`.
    #[must_use]
    pub fn bounds(&self) -> Option<(usize, usize)> {
        if self.0 < 1 {
            return None;
        }
        let index = usize::try_from(self.0 - 1).ok()?;
        let start = index.checked_mul(QUESTIONS_PER_PAGE)?;
        let end = start.checked_add(QUESTIONS_PER_PAGE)?;
        Some((start, end))
    }
}

fn parse_saturating(value: &str) -> Option<i64> {
    if let Ok(number) = value.parse::<i64>() {
        return Some(number);
    }
    let (digits, saturated) = match value.strip_prefix('-') {
        Some(rest) => (rest, i64::MIN),
        None => (value.strip_prefix('+').unwrap_or(value), i64::MAX),
    };
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(saturated)
}

/// Slice one page out of an ordered listing.
///
/// A page past the end yields an empty vector, never an error.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let Some((start, end)) = page.bounds() else {
        return Vec::new();
    };
    if start >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(start).take(end - start).collect()
}
