//! Numbered names for duplicated monsters ("Orc", "Orc 1", "Orc 2", ...)

/// Strip a trailing " <digits>" suffix: "Orc 3" -> "Orc"
pub fn base_name(name: &str) -> &str {
    match split_numbered(name) {
        Some(base) => base.trim(),
        None => name.trim(),
    }
}

/// Base part of "Orc  12" ("Orc"); the digits must follow whitespace
fn split_numbered(name: &str) -> Option<&str> {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == name.len() {
        return None;
    }

    let base = without_digits.trim_end();
    if base.len() == without_digits.len() {
        return None;
    }

    Some(base)
}

/// Next name in the numbered series of `source`, given the names of the
/// monsters currently on the roster
pub fn next_duplicate_name<'a>(
    source: &str,
    monster_names: impl IntoIterator<Item = &'a str>,
) -> String {
    let base = base_name(source);
    let prefix = format!("{} ", base);

    let highest = monster_names
        .into_iter()
        .filter_map(|name| name.strip_prefix(&prefix))
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .max();

    let next = highest.map_or(1, |n| n.saturating_add(1));
    format!("{} {}", base, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Orc"), "Orc");
        assert_eq!(base_name("Orc 3"), "Orc");
        assert_eq!(base_name("Orc   12"), "Orc");
        assert_eq!(base_name("Orc12"), "Orc12");
        assert_eq!(base_name("Cave Troll 2"), "Cave Troll");
    }

    #[test]
    fn test_first_duplicate_is_numbered_one() {
        assert_eq!(next_duplicate_name("Orc", ["Orc"]), "Orc 1");
    }

    #[test]
    fn test_numbering_continues_from_highest() {
        assert_eq!(next_duplicate_name("Orc", ["Orc", "Orc 1"]), "Orc 2");
        assert_eq!(next_duplicate_name("Orc 1", ["Orc", "Orc 1", "Orc 4"]), "Orc 5");
    }

    #[test]
    fn test_numbering_ignores_other_series() {
        assert_eq!(
            next_duplicate_name("Orc", ["Orc", "Orc Chief 3", "Orcish 2"]),
            "Orc 1"
        );
    }

    #[test]
    fn test_huge_suffix_does_not_overflow() {
        let top = format!("Orc {}", u64::MAX);
        assert_eq!(
            next_duplicate_name("Orc", ["Orc", top.as_str()]),
            format!("Orc {}", u64::MAX)
        );

        // Too long for a number at all: not part of the series
        assert_eq!(
            next_duplicate_name("Orc", ["Orc", "Orc 99999999999999999999999"]),
            "Orc 1"
        );
    }

    #[test]
    fn test_zero_suffix_is_not_counted() {
        assert_eq!(next_duplicate_name("Orc 0", ["Orc 0"]), "Orc 1");
    }
}
