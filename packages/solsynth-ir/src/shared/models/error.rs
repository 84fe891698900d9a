//! Error types for the solsynth-ir crate
//!
//! Every analysis stage reports through one error type. The kind tells the
//! caller which stage failed; all kinds are fatal for the build attempt that
//! raised them.

use std::fmt;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed AST input (unknown node type, missing location)
    Ast,
    /// Visitor failures surfaced through the walk
    Traversal,
    /// Control-flow graph invariant violations
    ControlFlow,
    /// Objective extraction invariant violations
    Objective,
    /// Constant / dependency / target extraction errors
    Extraction,
    /// Execution trace decoding errors
    Trace,
    /// Configuration errors
    Config,
    /// IO errors
    IO,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Ast => "ast",
            ErrorKind::Traversal => "traversal",
            ErrorKind::ControlFlow => "control_flow",
            ErrorKind::Objective => "objective",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Trace => "trace",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn ast(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Ast, message)
    }

    pub fn traversal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Traversal, message)
    }

    pub fn control_flow(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ControlFlow, message)
    }

    pub fn objective(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Objective, message)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Extraction, message)
    }

    pub fn trace(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Trace, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::ast(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::new(ErrorKind::IO, format!("IO error: {}", err)).with_source(err)
    }
}

impl From<crate::config::ConfigError> for AnalysisError {
    fn from(err: crate::config::ConfigError) -> Self {
        AnalysisError::config(err.to_string()).with_source(err)
    }
}
