//! Caller-requested include paths
//!
//! Requested includes arrive as dotted strings (`book.author`). Matching
//! walks segments rather than comparing opaque strings: a relation is
//! requested when its fully-qualified path equals a requested entry or is an
//! ancestor of one, so a deep request authorizes traversal through its
//! intermediate relations.

use crate::error::{Error, Result};

/// Parsed, immutable list of caller-requested include paths.
///
/// Built once at the root scope and shared by every scope in the tree.
#[derive(Debug, Clone, Default)]
pub struct RequestedPaths {
    paths: Vec<Vec<String>>,
}

impl RequestedPaths {
    /// Parse dotted include paths supplied by the caller.
    ///
    /// Empty paths and empty segments (`"a..b"`) are configuration errors.
    pub fn parse<S: AsRef<str>>(includes: &[S]) -> Result<Self> {
        let mut paths = Vec::with_capacity(includes.len());
        for raw in includes {
            let raw = raw.as_ref();
            if raw.is_empty() {
                return Err(Error::InvalidIncludePath {
                    path: raw.to_string(),
                    message: "path is empty".to_string(),
                });
            }
            let mut segments = Vec::new();
            for segment in raw.split('.') {
                if segment.is_empty() {
                    return Err(Error::InvalidIncludePath {
                        path: raw.to_string(),
                        message: "empty path segment".to_string(),
                    });
                }
                segments.push(segment.to_string());
            }
            paths.push(segments);
        }
        Ok(Self { paths })
    }

    /// Whether a fully-qualified path is requested.
    ///
    /// True when `path` equals a requested entry segment-wise, or is a
    /// proper prefix of one.
    pub fn matches(&self, path: &[String]) -> bool {
        self.paths.iter().any(|requested| {
            requested.len() >= path.len() && requested.iter().zip(path).all(|(a, b)| a == b)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn segments(path: &str) -> Vec<String> {
        path.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_parse_rejects_empty_path() {
        let err = RequestedPaths::parse(&[""]).unwrap_err();
        assert!(matches!(err, Error::InvalidIncludePath { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        let err = RequestedPaths::parse(&["books..author"]).unwrap_err();
        assert!(matches!(err, Error::InvalidIncludePath { .. }));
    }

    #[rstest]
    #[case("author", true)] // exact
    #[case("books", true)] // ancestor of books.author
    #[case("books.author", true)] // exact deep entry
    #[case("books.author.books", false)] // deeper than any request
    #[case("characters", false)] // never requested
    fn test_matches(#[case] path: &str, #[case] expected: bool) {
        let requested = RequestedPaths::parse(&["author", "books.author"]).unwrap();
        assert_eq!(requested.matches(&segments(path)), expected);
    }

    #[test]
    fn test_matching_walks_segments_not_prefixes() {
        // "book" is not an ancestor of "books.author" even though the
        // string "books.author" starts with "book".
        let requested = RequestedPaths::parse(&["books.author"]).unwrap();
        assert!(!requested.matches(&segments("book")));
    }

    #[test]
    fn test_leaf_request_does_not_leak_into_other_branches() {
        let requested = RequestedPaths::parse(&["books.author"]).unwrap();
        assert!(!requested.matches(&segments("publisher.author")));
        assert!(!requested.matches(&segments("author")));
    }

    #[test]
    fn test_empty_request_list_matches_nothing() {
        let requested = RequestedPaths::parse::<&str>(&[]).unwrap();
        assert!(!requested.matches(&segments("author")));
    }
}
