//! Exit codes for categorizing processor errors.
//!
//! Every [`Diagnostic`](super::Diagnostic) carries an `ExitCode` naming the
//! broad error category. The codes follow the `Exit_NN` scheme of the
//! processor's external interface; the driver binary also uses the numeric
//! part as its process exit status.
//!
//! # Examples
//!
//! ```
//! use spockc_util::ExitCode;
//!
//! assert_eq!(ExitCode::SYNTAX.as_str(), "Exit_53");
//! assert_eq!(ExitCode::SYNTAX.category(), "Syntax error");
//! ```

/// A broad error category, identified as `Exit_NN`.
///
/// # Examples
///
/// ```
/// use spockc_util::ExitCode;
///
/// let code = ExitCode::RUNTIME;
/// assert_eq!(code.number(), 49);
/// assert_eq!(format!("{}", code), "Exit_49");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(u32);

impl ExitCode {
    /// Exit_53: malformed source rejected by the scanner or parser.
    pub const SYNTAX: Self = Self(53);

    /// Exit_49: failure while reducing an expression.
    pub const RUNTIME: Self = Self(49);

    /// Exit_57: operand of the wrong shape for an operation.
    pub const TYPE: Self = Self(57);

    /// Exit_48: nesting deeper than the processor supports.
    pub const RECURSION: Self = Self(48);

    /// Exit_44: allocation limits exceeded.
    pub const MEMORY: Self = Self(44);

    /// Get the numeric identifier.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.0
    }

    /// Get the full code string, e.g. `"Exit_53"`.
    pub fn as_str(&self) -> String {
        format!("Exit_{}", self.0)
    }

    /// Human-readable category text for this code.
    pub fn category(&self) -> &'static str {
        match self.0 {
            44 => "Memory error",
            48 => "Recursion error",
            49 => "Runtime error",
            53 => "Syntax error",
            57 => "Type error",
            _ => "Unknown error",
        }
    }
}

impl std::fmt::Debug for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExitCode({})", self.as_str())
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
