//! Reviewer list parsing.

/// Split a comma-separated reviewer list into display names.
///
/// Names are trimmed, blank entries are dropped and repeated names are kept
/// only once, in first-seen order.
///
/// # Example
///
/// ```
/// use azgit_core::parse_reviewers;
///
/// assert_eq!(parse_reviewers(" Alice, Team X,,Alice "), vec!["Alice", "Team X"]);
/// ```
#[must_use]
pub fn parse_reviewers(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert!(parse_reviewers("").is_empty());
        assert!(parse_reviewers(" , ,").is_empty());
    }

    #[test]
    fn test_trims_and_keeps_order() {
        assert_eq!(
            parse_reviewers("Bob ,  Alice,Team X"),
            vec!["Bob", "Alice", "Team X"]
        );
    }

    #[test]
    fn test_inner_spaces_are_kept() {
        assert_eq!(parse_reviewers("Release  Managers"), vec!["Release  Managers"]);
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(parse_reviewers("Alice,Alice, Alice"), vec!["Alice"]);
    }
}
