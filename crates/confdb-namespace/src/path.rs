//! Path grammar for the namespace.
//!
//! A path is absolute and slash-separated:
//! - The empty string and `/` both name the root
//! - Every other path starts with `/`
//! - Segments between slashes must be non-empty (no `//`, no trailing `/`)
//! - Segments must not be `.` or `..`
//! - The NUL byte is not allowed anywhere

use crate::error::{NamespaceError, Result};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// How the root renders when shown on its own.
pub const ROOT_PATH: &str = "/";

/// Split `path` into its segments, validating it along the way.
///
/// The root (`""` or `"/"`) yields no segments.
///
/// # Examples
///
/// ```
/// use confdb_namespace::path::segments;
///
/// assert_eq!(segments("/a/b").unwrap(), vec!["a", "b"]);
/// assert!(segments("/").unwrap().is_empty());
/// assert!(segments("a/b").is_err());
/// assert!(segments("/a//b").is_err());
/// ```
pub fn segments(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() || path == ROOT_PATH {
        return Ok(Vec::new());
    }

    let Some(rest) = path.strip_prefix(SEPARATOR) else {
        return Err(NamespaceError::invalid(path, "must start with '/'"));
    };

    if path.contains('\0') {
        return Err(NamespaceError::invalid(path, "must not contain NUL"));
    }

    let mut parts = Vec::new();
    for segment in rest.split(SEPARATOR) {
        match segment {
            "" => {
                return Err(NamespaceError::invalid(
                    path,
                    "path segments must not be empty",
                ))
            }
            "." | ".." => {
                return Err(NamespaceError::invalid(
                    path,
                    format!("segment {segment:?} is not allowed"),
                ))
            }
            _ => parts.push(segment),
        }
    }
    Ok(parts)
}

/// Validate a path, returning `Ok(())` if it is well formed.
pub fn validate_path(path: &str) -> Result<()> {
    segments(path).map(|_| ())
}

/// Append a segment to a full path. The root is the empty prefix.
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.strip_suffix(SEPARATOR).unwrap_or(parent);
    format!("{parent}{SEPARATOR}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_forms() {
        assert!(segments("").unwrap().is_empty());
        assert!(segments("/").unwrap().is_empty());
    }

    #[test]
    fn simple_and_nested() {
        assert_eq!(segments("/foo").unwrap(), vec!["foo"]);
        assert_eq!(segments("/foo/bar/baz").unwrap(), vec!["foo", "bar", "baz"]);
        assert_eq!(segments("/with space/v1.0").unwrap(), vec!["with space", "v1.0"]);
    }

    #[test]
    fn reject_relative() {
        assert!(segments("foo").is_err());
        assert!(segments("foo/bar").is_err());
    }

    #[test]
    fn reject_empty_segments() {
        assert!(segments("//").is_err());
        assert!(segments("/a//b").is_err());
        assert!(segments("/a/").is_err());
    }

    #[test]
    fn reject_dot_segments() {
        assert!(segments("/.").is_err());
        assert!(segments("/a/../b").is_err());
        assert!(segments("/.hidden").is_ok());
    }

    #[test]
    fn reject_nul() {
        assert!(segments("/a\0b").is_err());
    }

    #[test]
    fn invalid_path_is_not_not_found() {
        let err = validate_path("nope").unwrap_err();
        assert!(matches!(err, NamespaceError::InvalidPath { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn join_paths() {
        assert_eq!(join("", "foo"), "/foo");
        assert_eq!(join("/", "foo"), "/foo");
        assert_eq!(join("/foo", "bar"), "/foo/bar");
    }
}
