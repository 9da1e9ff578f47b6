//! Git ref name validation and newtype.
//!
//! Provides a [`RefName`] type holding a fully qualified ref (`refs/...`)
//! that satisfies git's ref naming rules.

use std::fmt;

use crate::error::Error;

const REFS_PREFIX: &str = "refs/";
const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";

/// A validated, fully qualified git ref name.
///
/// # Examples
///
/// ```
/// use azgit_core::RefName;
///
/// let main = RefName::branch("main").unwrap();
/// assert_eq!(main.as_str(), "refs/heads/main");
/// assert_eq!(main.filter(), "heads/main");
///
/// let tag = RefName::tag("v1.0").unwrap();
/// assert_eq!(tag.as_str(), "refs/tags/v1.0");
///
/// assert!(RefName::branch("bad..name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName(String);

impl RefName {
    /// Create a ref name from a fully qualified name (`refs/...`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRefName`] if the name is not under `refs/` or
    /// violates git's ref naming rules.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if !name.starts_with(REFS_PREFIX) {
            return Err(invalid(&name, "ref name must start with 'refs/'"));
        }
        validate_ref_name(&name)?;
        Ok(Self(name))
    }

    /// Create a branch ref; a short name like `feature/x` is placed under `refs/heads/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRefName`] if the result is not a valid ref name.
    pub fn branch(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        if name.starts_with(REFS_PREFIX) {
            Self::new(name)
        } else {
            Self::new(format!("{HEADS_PREFIX}{name}"))
        }
    }

    /// Create the ref of a tag, `refs/tags/<name>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRefName`] if the result is not a valid ref name.
    pub fn tag(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        Self::new(format!("{TAGS_PREFIX}{}", name.strip_prefix(TAGS_PREFIX).unwrap_or(name)))
    }

    /// Get the ref name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without the leading `refs/`, as used by ref list filters.
    #[must_use]
    pub fn filter(&self) -> &str {
        self.0.strip_prefix(REFS_PREFIX).unwrap_or(&self.0)
    }

    /// Consume the `RefName` and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for RefName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for RefName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RefName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> Error {
    Error::InvalidRefName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a ref name against `git check-ref-format` rules.
///
/// ```
/// assert!(azgit_core::validate_ref_name("refs/heads/feature/x").is_ok());
/// assert!(azgit_core::validate_ref_name("refs/heads/a..b").is_err());
/// ```
///
/// # Errors
/// Returns [`Error::InvalidRefName`] naming the first rule the name breaks.
pub fn validate_ref_name(name: &str) -> Result<(), Error> {
    if name.ends_with('/') {
        return Err(invalid(name, "ref name cannot end with '/'"));
    }

    if name.ends_with('.') {
        return Err(invalid(name, "ref name cannot end with '.'"));
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid(name, "ref name cannot contain '//'"));
        }
        if component.starts_with('.') {
            return Err(invalid(name, "ref name component cannot start with '.'"));
        }
        // git's rule is case-sensitive
        #[allow(clippy::case_sensitive_file_extension_comparisons)]
        if component.ends_with(".lock") {
            return Err(invalid(name, "ref name component cannot end with '.lock'"));
        }
    }

    if name.contains("..") {
        return Err(invalid(name, "ref name cannot contain '..'"));
    }

    if name.contains("@{") {
        return Err(invalid(name, "ref name cannot contain '@{'"));
    }

    for c in name.chars() {
        if c.is_ascii_control() {
            return Err(invalid(name, "ref name cannot contain control characters"));
        }
        if matches!(c, ' ' | '~' | '^' | ':' | '?' | '*' | '[' | '\\') {
            return Err(invalid(name, format!("ref name cannot contain '{c}'")));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_short_name_is_qualified() {
        let name = RefName::branch("feature/auth").unwrap();
        assert_eq!(name, "refs/heads/feature/auth");
    }

    #[test]
    fn test_branch_full_name_is_kept() {
        let name = RefName::branch("refs/heads/merge/feature").unwrap();
        assert_eq!(name.as_str(), "refs/heads/merge/feature");
        assert_eq!(name.filter(), "heads/merge/feature");
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(RefName::tag("v1.2.3").unwrap(), "refs/tags/v1.2.3");
        assert_eq!(RefName::tag("refs/tags/v1").unwrap(), "refs/tags/v1");
        assert_eq!(RefName::tag("v1").unwrap().filter(), "tags/v1");
    }

    #[test]
    fn test_new_requires_refs_prefix() {
        let err = RefName::new("heads/main").unwrap_err();
        assert!(matches!(err, Error::InvalidRefName { .. }));
    }

    #[test]
    fn test_empty_branch() {
        let err = RefName::branch("").unwrap_err();
        assert!(matches!(err, Error::InvalidRefName { .. }));
    }

    #[test]
    fn test_dot_rules() {
        for name in ["bad..name", ".hidden", "feature/.hidden", "branch.", "branch.lock"] {
            let err = RefName::branch(name).unwrap_err();
            assert!(matches!(err, Error::InvalidRefName { .. }), "name: {name}");
        }
    }

    #[test]
    fn test_slash_rules() {
        for name in ["feature//auth", "branch/"] {
            let err = RefName::branch(name).unwrap_err();
            assert!(matches!(err, Error::InvalidRefName { .. }), "name: {name}");
        }
    }

    #[test]
    fn test_git_forbidden_characters() {
        for c in [' ', '~', '^', ':', '?', '*', '[', '\\', '\t'] {
            let name = format!("branch{c}name");
            let err = RefName::branch(&name).unwrap_err();
            assert!(matches!(err, Error::InvalidRefName { .. }), "char: {c:?}");
        }
    }

    #[test]
    fn test_at_brace_sequence() {
        let err = RefName::branch("branch@{1}").unwrap_err();
        assert!(matches!(err, Error::InvalidRefName { .. }));
        assert!(RefName::branch("user@feature").is_ok());
    }

    #[test]
    fn test_validate_ref_name_from_crate_root() {
        assert!(crate::validate_ref_name("refs/tags/v1.0").is_ok());

        let err = crate::validate_ref_name("refs/heads/topic.lock").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRefName { ref reason, .. } if reason.contains(".lock")
        ));
    }

    #[test]
    fn test_display_and_deref() {
        let name = RefName::branch("main").unwrap();
        assert_eq!(format!("{name}"), "refs/heads/main");
        assert_eq!(&*name, "refs/heads/main");
        assert_eq!(name.into_inner(), "refs/heads/main");
    }
}
