//! Error types for Redes operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Redes operations.
///
/// Covers input validation (mismatched population vectors, out-of-range node
/// ids), malformed flat files, and the signaled exhaustion condition raised
/// by the out-degree backfill pass when no eligible candidate remains.
///
/// # Examples
///
/// ```
/// use redes::error::RedesError;
///
/// let err = RedesError::NodeOutOfRange { node: 7, len: 5 };
/// assert!(err.to_string().contains("node id 7"));
/// ```
#[derive(Debug)]
pub enum RedesError {
    /// A node-indexed input does not match the graph's node count.
    DimensionMismatch {
        /// Expected length description
        expected: String,
        /// Actual length found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A population entry is negative or non-finite.
    InvalidPopulation {
        /// Offending node id
        node: usize,
        /// Offending value
        value: f64,
    },

    /// A node id references a position outside the node-indexed range.
    NodeOutOfRange {
        /// Offending node id
        node: usize,
        /// Length of the indexed range
        len: usize,
    },

    /// The backfill pass ran out of eligible candidates before reaching
    /// its utilization target.
    ExhaustedCandidates {
        /// Budget consumed when candidates ran out
        used_budget: f64,
        /// Utilization target that was not reached
        target: f64,
    },

    /// A flat input file contains a malformed line.
    ParseError {
        /// Path of the offending file
        path: String,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl RedesError {
    /// Convenience constructor for a node-indexed length mismatch.
    pub fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        RedesError::DimensionMismatch {
            expected: format!("{what}={expected}"),
            actual: actual.to_string(),
        }
    }

    /// Convenience constructor for malformed file content.
    pub fn parse(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        RedesError::ParseError {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for RedesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedesError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            RedesError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter {param}={value}: must satisfy {constraint}"
                )
            }
            RedesError::InvalidPopulation { node, value } => {
                write!(
                    f,
                    "invalid population {value} at node {node}: entries must be finite and >= 0"
                )
            }
            RedesError::NodeOutOfRange { node, len } => {
                write!(f, "node id {node} out of range (len={len})")
            }
            RedesError::ExhaustedCandidates { used_budget, target } => {
                write!(
                    f,
                    "no eligible candidates left at used_budget={used_budget} (target {target})"
                )
            }
            RedesError::ParseError {
                path,
                line,
                message,
            } => {
                write!(f, "{path}:{line}: {message}")
            }
            RedesError::Io(err) => write!(f, "I/O error: {err}"),
            RedesError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RedesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RedesError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RedesError {
    fn from(err: std::io::Error) -> Self {
        RedesError::Io(err)
    }
}

impl From<String> for RedesError {
    fn from(msg: String) -> Self {
        RedesError::Other(msg)
    }
}

impl From<&str> for RedesError {
    fn from(msg: &str) -> Self {
        RedesError::Other(msg.to_string())
    }
}

/// Result type alias for Redes operations.
pub type Result<T> = std::result::Result<T, RedesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = RedesError::dimension_mismatch("population", 10, 7);
        let msg = err.to_string();
        assert!(msg.contains("population=10"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_node_out_of_range_display() {
        let err = RedesError::NodeOutOfRange { node: 12, len: 4 };
        assert!(err.to_string().contains("node id 12"));
        assert!(err.to_string().contains("len=4"));
    }

    #[test]
    fn test_exhausted_candidates_display() {
        let err = RedesError::ExhaustedCandidates {
            used_budget: 4.0,
            target: 9.0,
        };
        assert!(err.to_string().contains("no eligible candidates"));
    }

    #[test]
    fn test_parse_error_includes_location() {
        let err = RedesError::parse("edges.txt", 3, "expected two columns");
        assert_eq!(err.to_string(), "edges.txt:3: expected two columns");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RedesError = io_err.into();
        assert!(matches!(err, RedesError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = RedesError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_string() {
        let err: RedesError = String::from("custom failure").into();
        assert!(matches!(err, RedesError::Other(_)));
        assert_eq!(err.to_string(), "custom failure");
    }

    #[test]
    fn test_from_str() {
        let err: RedesError = "custom failure".into();
        assert!(matches!(err, RedesError::Other(_)));
        assert_eq!(err.to_string(), "custom failure");
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = RedesError::Other("oops".to_string());
        assert!(err.source().is_none());
    }
}
