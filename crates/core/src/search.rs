//! Listing and search helpers shared by the browse endpoints.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, defaulting to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern from a free-text query.
///
/// Returns `None` for blank input so callers can skip the filter entirely.
/// `%`, `_` and `\` are escaped so they match literally.
pub fn ilike_pattern(query: Option<&str>) -> Option<String> {
    let trimmed = query?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Normalize an optional filter value: trims, lowercases, and drops blanks.
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
    }

    #[test]
    fn clamp_offset_defaults_to_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn ilike_pattern_wraps_and_escapes() {
        assert_eq!(ilike_pattern(Some("solar")).as_deref(), Some("%solar%"));
        assert_eq!(
            ilike_pattern(Some("100%_done")).as_deref(),
            Some("%100\\%\\_done%")
        );
    }

    #[test]
    fn ilike_pattern_skips_blank_input() {
        assert_eq!(ilike_pattern(None), None);
        assert_eq!(ilike_pattern(Some("   ")), None);
    }

    #[test]
    fn normalize_filter_lowercases_and_trims() {
        assert_eq!(normalize_filter(Some("  FinTech ")).as_deref(), Some("fintech"));
        assert_eq!(normalize_filter(Some("")), None);
        assert_eq!(normalize_filter(None), None);
    }
}
