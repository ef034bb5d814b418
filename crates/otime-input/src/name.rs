//! Runner display-name normalization.
//!
//! Some punch sources deliver names as `"Family, Given"`. Reordering them
//! for display is a presentation concern, so it lives here with the other
//! collaborators rather than in the engine.

/// Normalizes `"Family, Given"` to `"Given Family"`.
///
/// Names without a comma, or with nothing after it, pass through trimmed.
pub fn normalize_name(name: &str) -> String {
    match name.split_once(',') {
        Some((family, given)) if !given.trim().is_empty() => {
            format!("{} {}", given.trim(), family.trim())
        }
        _ => name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorders_family_comma_given() {
        assert_eq!(normalize_name("Svensson, Anna"), "Anna Svensson");
    }

    #[test]
    fn passes_plain_names_through() {
        assert_eq!(normalize_name("Anna Svensson"), "Anna Svensson");
        assert_eq!(normalize_name("  Bo Karlsson "), "Bo Karlsson");
    }

    #[test]
    fn keeps_trailing_comma_names_intact() {
        assert_eq!(normalize_name("Svensson,"), "Svensson,");
    }
}
