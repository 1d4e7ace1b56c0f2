//! Diagnostic module - structured error reporting for the pipeline.
//!
//! Every stage of the processor fails fast with a [`Diagnostic`]: a single
//! error carrier recording the stage, an [`ExitCode`] category, a message,
//! a source [`Location`], and the [`Frame`] in this codebase that raised it.
//!
//! # Examples
//!
//! ```
//! use spockc_util::{Diagnostic, Location, Stage};
//!
//! let diag = Diagnostic::scanner("Source must end with '$$'");
//! assert_eq!(diag.stage, Stage::Scanner);
//! assert_eq!(diag.code.number(), 53);
//!
//! let diag = Diagnostic::parser("unexpected token")
//!     .at(Location::line_col(2, 7));
//! assert_eq!(diag.location, Location::LineCol { line: 2, column: 7 });
//! ```

mod codes;

pub use codes::ExitCode;

use std::fmt;
use std::panic::Location as CallerLocation;

use thiserror::Error;

/// The pipeline stage a diagnostic originates from.
///
/// # Examples
///
/// ```
/// use spockc_util::Stage;
///
/// assert_eq!(format!("{}", Stage::Scanner), "scanner");
/// assert_eq!(format!("{}", Stage::Unknown), "unknown");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Line framing, comment stripping, tokenization
    Scanner,
    /// Grouping, validation, RPN planning
    Parser,
    /// Three-valued reduction and rendering
    Evaluator,
    /// Anything outside the three pipeline stages
    Unknown,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Scanner => write!(f, "scanner"),
            Stage::Parser => write!(f, "parser"),
            Stage::Evaluator => write!(f, "evaluator"),
            Stage::Unknown => write!(f, "unknown"),
        }
    }
}

/// Where in the source a diagnostic points.
///
/// Scanner and set-literal errors pin a physical line and column;
/// validation errors pin a 1-based expression number, usually with the
/// offending token's column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Location {
    /// No usable source position
    #[default]
    None,
    /// Physical line and column, both 1-based
    LineCol { line: u32, column: u32 },
    /// 1-based expression number, with the column when known
    Expression { number: u32, column: Option<u32> },
}

impl Location {
    /// Pin a physical line and column.
    #[inline]
    pub fn line_col(line: u32, column: u32) -> Self {
        Location::LineCol { line, column }
    }

    /// Pin a 1-based expression number.
    #[inline]
    pub fn expression(number: u32, column: Option<u32>) -> Self {
        Location::Expression { number, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => write!(f, "<no location>"),
            Location::LineCol { line, column } => {
                write!(f, "line {}, column {}", line, column)
            }
            Location::Expression { number, column: Some(c) } => {
                write!(f, "Expression {}, column {}", number, c)
            }
            Location::Expression { number, column: None } => {
                write!(f, "Expression {}", number)
            }
        }
    }
}

/// The source frame in this codebase that raised a diagnostic.
///
/// Captured automatically by the [`Diagnostic`] constructors via
/// `#[track_caller]`, standing in for a stack trace in the common case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// File the diagnostic was constructed in
    pub file: &'static str,
    /// Line the diagnostic was constructed at
    pub line: u32,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A structured processor error.
///
/// One carrier for all three stages: who failed ([`Stage`]), what category
/// ([`ExitCode`]), the human message, where in the source ([`Location`]),
/// which frame raised it, and an optional formatted trace supplied by the
/// driver's catch-all.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{stage} error: {message}")]
pub struct Diagnostic {
    /// Originating pipeline stage
    pub stage: Stage,
    /// Error category
    pub code: ExitCode,
    /// Human-readable message
    pub message: String,
    /// Source position the message is pinned to
    pub location: Location,
    /// Codebase frame that raised the error
    pub frame: Frame,
    /// Optional formatted trace (driver catch-all only)
    pub trace: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit stage and code.
    ///
    /// The constructing frame is captured from the caller.
    #[track_caller]
    pub fn new(stage: Stage, code: ExitCode, message: impl Into<String>) -> Self {
        let caller = CallerLocation::caller();
        Self {
            stage,
            code,
            message: message.into(),
            location: Location::None,
            frame: Frame {
                file: caller.file(),
                line: caller.line(),
            },
            trace: None,
        }
    }

    /// A scanner-stage syntax error.
    #[track_caller]
    pub fn scanner(message: impl Into<String>) -> Self {
        Self::new(Stage::Scanner, ExitCode::SYNTAX, message)
    }

    /// A parser-stage syntax error.
    #[track_caller]
    pub fn parser(message: impl Into<String>) -> Self {
        Self::new(Stage::Parser, ExitCode::SYNTAX, message)
    }

    /// An evaluator-stage runtime error.
    #[track_caller]
    pub fn evaluator(message: impl Into<String>) -> Self {
        Self::new(Stage::Evaluator, ExitCode::RUNTIME, message)
    }

    /// An error from outside the pipeline stages.
    #[track_caller]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Stage::Unknown, ExitCode::RUNTIME, message)
    }

    /// Set the source location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Override the exit code, keeping everything else.
    pub fn with_code(mut self, code: ExitCode) -> Self {
        self.code = code;
        self
    }

    /// Attach a formatted trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Render the full error report.
    ///
    /// One line per known field, in the shape the driver prints to stderr:
    ///
    /// ```text
    /// spockc: parser error (Exit_53: Syntax error)
    ///   message: Expression 1: ...
    ///   location: line 2, column 7
    ///   origin: crates/spockc-par/src/validate.rs:88
    /// ```
    pub fn report(&self) -> String {
        let mut out = format!(
            "spockc: {} error ({}: {})\n  message: {}\n",
            self.stage,
            self.code,
            self.code.category(),
            self.message
        );
        if self.location != Location::None {
            out.push_str(&format!("  location: {}\n", self.location));
        }
        out.push_str(&format!("  origin: {}\n", self.frame));
        if let Some(trace) = &self.trace {
            out.push_str(&format!("  trace: {}\n", trace));
        }
        out
    }
}
