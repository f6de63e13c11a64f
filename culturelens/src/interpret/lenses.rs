//! Cultural lens ordering.

/// The lens every object starts out in. Always offered, even when the
/// backend omits it from `available_lenses`.
pub const DEFAULT_LENS: &str = "neutral";

/// Produces the lens picker order for a response's `available_lenses`:
/// the default lens first, then the backend's lenses in received order,
/// with duplicates dropped.
pub fn normalize_lenses(available: &[String]) -> Vec<String> {
    let mut ordered = Vec::with_capacity(available.len() + 1);
    ordered.push(DEFAULT_LENS.to_string());
    for lens in available {
        if !ordered.iter().any(|known| known == lens) {
            ordered.push(lens.clone());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenses(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_lens_comes_first() {
        let ordered = normalize_lenses(&lenses(&["local", "colonial"]));
        assert_eq!(ordered, lenses(&["neutral", "local", "colonial"]));
    }

    #[test]
    fn test_backend_neutral_is_not_duplicated() {
        let ordered = normalize_lenses(&lenses(&["local", "neutral", "asian"]));
        assert_eq!(ordered, lenses(&["neutral", "local", "asian"]));
    }

    #[test]
    fn test_received_order_is_preserved() {
        let ordered = normalize_lenses(&lenses(&["indigenous", "european", "indigenous"]));
        assert_eq!(ordered, lenses(&["neutral", "indigenous", "european"]));
    }

    #[test]
    fn test_empty_listing_still_offers_default() {
        assert_eq!(normalize_lenses(&[]), lenses(&["neutral"]));
    }
}
