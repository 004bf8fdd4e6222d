//! Helpers for Shopify global identifiers (`gid://shopify/Type/123`).

/// Extract the trailing numeric id from a GID.
///
/// Returns the input unchanged when it contains no `/`, which keeps plain
/// numeric ids working.
#[must_use]
pub fn extract_numeric_id(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_trailing_id() {
        assert_eq!(extract_numeric_id("gid://shopify/Order/1001"), "1001");
        assert_eq!(
            extract_numeric_id("gid://shopify/ProductVariant/42"),
            "42"
        );
    }

    #[test]
    fn test_plain_id_passes_through() {
        assert_eq!(extract_numeric_id("1001"), "1001");
    }
}
