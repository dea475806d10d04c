//! URL-safe slug derivation for recipient names.
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").expect("valid slug pattern"));

fn normalize(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Derive the public slug for a name pair.
///
/// Each name is trimmed, lowercased, and every maximal run of characters
/// outside `[a-z0-9]` collapses to a single hyphen. Both parts non-empty
/// join as `first-last`; a single surviving part stands alone; when both
/// normalize to nothing the literal `guest` is returned. Pure and total,
/// shared between bulk ingestion and the single-record preview flow.
pub fn slugify(first_name: &str, last_name: &str) -> String {
    let first = normalize(first_name);
    let last = normalize(last_name);
    if !first.is_empty() && !last.is_empty() {
        return format!("{}-{}", first, last);
    }
    if !first.is_empty() {
        first
    } else if !last.is_empty() {
        last
    } else {
        "guest".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_both_names_with_hyphen() {
        assert_eq!(slugify("Ali", "Aliyev"), "ali-aliyev");
        assert_eq!(slugify("Leyla", "Huseynova"), "leyla-huseynova");
    }

    #[test]
    fn both_empty_falls_back_to_guest() {
        assert_eq!(slugify("", ""), "guest");
        assert_eq!(slugify("   ", "\t"), "guest");
        assert_eq!(slugify("!!!", "??"), "guest");
    }

    #[test]
    fn single_surviving_part_stands_alone() {
        assert_eq!(slugify("Ali!!", "  "), "ali");
        assert_eq!(slugify("", "Huseynova"), "huseynova");
    }

    #[test]
    fn symbol_runs_collapse_to_one_hyphen() {
        assert_eq!(slugify("Anne Marie", "O'Neill"), "anne-marie-o-neill");
        assert_eq!(slugify("  Jean--Luc ", "Picard "), "jean-luc-picard");
    }

    #[test]
    fn leading_and_trailing_symbols_are_stripped() {
        assert_eq!(slugify("--Ali--", "(Aliyev)"), "ali-aliyev");
    }
}
