//! Source location tracking for error reporting
//!
//! Every token carries a span so that syntax and semantic errors can point
//! at the offending position in the layer source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Location in an anonymous input buffer
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("net.psl", 42, 10);
        assert_eq!(loc.filename, "net.psl");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "net.psl:42:10");
    }

    #[test]
    fn test_source_span_same_line() {
        let start = SourceLocation::new("net.psl", 1, 5);
        let end = SourceLocation::new("net.psl", 1, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "net.psl:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let start = SourceLocation::new("net.psl", 1, 5);
        let end = SourceLocation::new("net.psl", 3, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "net.psl:1:5-3:10");
    }

    #[test]
    fn test_point_span_prints_as_location() {
        let span = SourceSpan::from_location(SourceLocation::new_simple(2, 7));
        assert_eq!(format!("{}", span), "<input>:2:7");
    }
}
