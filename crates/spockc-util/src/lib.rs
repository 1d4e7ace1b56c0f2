//! spockc-util - Foundation types for the Spock processor
//!
//! This crate provides the types shared by every pipeline stage:
//! the structured diagnostic carrier, the stage tags, source locations,
//! and the exit-code table.
//!
//! The pipeline crates (`spockc-lex`, `spockc-par`, `spockc-eval`) never
//! print anything; they return [`Diagnostic`] values and the driver decides
//! how to surface them.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, ExitCode, Frame, Location, Stage};

/// Result type used throughout the pipeline crates.
pub type Result<T> = std::result::Result<T, Diagnostic>;
