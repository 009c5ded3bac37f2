//! core::path
//!
//! Dot-delimited registry paths.
//!
//! A path like `app.database.host` is an ordered sequence of non-empty
//! segments. Paths are validated once at construction so the tree walk
//! never has to deal with empty keys.
//!
//! # Example
//!
//! ```
//! use svcreg::core::path::RegistryPath;
//!
//! let path = RegistryPath::parse("app.database.host").unwrap();
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.leaf(), "host");
//! assert_eq!(path.parent(), ["app".to_string(), "database".to_string()]);
//!
//! assert!(RegistryPath::parse("").is_err());
//! assert!(RegistryPath::parse("app..host").is_err());
//! ```

use thiserror::Error;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Errors from path parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("registry path is empty")]
    Empty,

    #[error("registry path '{path}' contains an empty segment")]
    EmptySegment { path: String },
}

/// A validated registry path with at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryPath {
    segments: Vec<String>,
}

impl RegistryPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// - `PathError::Empty` if the input is empty or only whitespace
    /// - `PathError::EmptySegment` if any segment between dots is empty
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.trim().is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for segment in input.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: input.to_string(),
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every segment except the last.
    pub fn parent(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The last segment.
    pub fn leaf(&self) -> &str {
        // Construction guarantees at least one segment.
        &self.segments[self.segments.len() - 1]
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a parsed path has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::str::FromStr for RegistryPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_segment() {
        let path = RegistryPath::parse("app").unwrap();
        assert_eq!(path.segments(), ["app".to_string()]);
        assert!(path.parent().is_empty());
        assert_eq!(path.leaf(), "app");
    }

    #[test]
    fn parse_nested() {
        let path = RegistryPath::parse("path.to.file").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.parent(), ["path".to_string(), "to".to_string()]);
        assert_eq!(path.leaf(), "file");
        assert_eq!(path.to_string(), "path.to.file");
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(RegistryPath::parse(""), Err(PathError::Empty));
        assert_eq!(RegistryPath::parse("   "), Err(PathError::Empty));
    }

    #[test]
    fn empty_segments_rejected() {
        for input in [".a", "a.", "a..b", "."] {
            assert!(
                matches!(
                    RegistryPath::parse(input),
                    Err(PathError::EmptySegment { .. })
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn segments_are_not_trimmed() {
        let path = RegistryPath::parse(" a . b").unwrap();
        assert_eq!(path.segments(), [" a ".to_string(), " b".to_string()]);
    }

    #[test]
    fn from_str_matches_parse() {
        let path: RegistryPath = "a.b".parse().unwrap();
        assert_eq!(path, RegistryPath::parse("a.b").unwrap());
    }
}
