//! Error types for the solsynth-search crate
//!
//! Invariant violations (bad child index or kind, empty test case, wrong
//! crossover arity) and scope gaps (unsupported parameter types) surface
//! here. Callers record them against the individual and move on.

use std::fmt;

use solsynth_ir::config::ConfigError;
use solsynth_ir::AnalysisError;
use thiserror::Error;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `set_child` index outside the statement's child range
    InvalidChildIndex,
    /// `set_child` value of the wrong statement kind or type
    WrongChildKind,
    /// Test case without root statements
    EmptyTestCase,
    /// Crossover not given exactly two parents
    CrossoverArity,
    /// Parameter type the sampler cannot build yet
    UnsupportedType,
    /// Target id missing from the catalog
    UnknownTarget,
    /// Catalog without deployable contracts or actions
    NoTargets,
    /// Sampling settings outside their valid ranges
    Config,
    /// Error raised by the analysis side
    Analysis,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidChildIndex => "invalid_child_index",
            ErrorKind::WrongChildKind => "wrong_child_kind",
            ErrorKind::EmptyTestCase => "empty_test_case",
            ErrorKind::CrossoverArity => "crossover_arity",
            ErrorKind::UnsupportedType => "unsupported_type",
            ErrorKind::UnknownTarget => "unknown_target",
            ErrorKind::NoTargets => "no_targets",
            ErrorKind::Config => "config",
            ErrorKind::Analysis => "analysis",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct SearchError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SearchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_child_index(index: usize, max: usize, statement: &str) -> Self {
        Self::new(
            ErrorKind::InvalidChildIndex,
            format!("child index {} outside [0, {}] of {}", index, max, statement),
        )
    }

    pub fn wrong_child_kind(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongChildKind, message)
    }

    pub fn unsupported_type(category: &str, type_string: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedType,
            format!("sampling {} parameters ('{}') is not supported yet", category, type_string),
        )
    }

    pub fn unknown_target(id: &str) -> Self {
        Self::new(ErrorKind::UnknownTarget, format!("no target with id '{}'", id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<AnalysisError> for SearchError {
    fn from(err: AnalysisError) -> Self {
        Self {
            kind: ErrorKind::Analysis,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(err: ConfigError) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias
pub type SearchResult<T> = std::result::Result<T, SearchError>;
