//! spockc-drv - Pipeline driver
//!
//! The driver orchestrates the three stages and owns the only public
//! entry point, [`analyze`]: source text in, rendered results or one
//! structured [`Diagnostic`] out. It also carries the `spockc` binary's
//! [`Config`]/[`Session`] plumbing, which performs the caller duties the
//! core deliberately leaves outside: reading input, UTF-8 sanitization,
//! and appending the `$$` terminator.
//!
//! ```text
//! Source text
//!      │
//!      ▼
//!  [Scanner] ──▶ token stream        (spockc-lex)
//!      │
//!      ▼
//!  [Parser] ──▶ RPN per line         (spockc-par)
//!      │
//!      ▼
//!  [Evaluator] ──▶ result text       (spockc-eval)
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use spockc_util::Diagnostic;

/// Analyze Spock source text.
///
/// The input must already end with the `$$` terminator; use
/// [`prepare_source`] for raw caller input. Returns the rendered results,
/// one line per evaluated expression, newline-terminated.
///
/// # Errors
///
/// The first failing stage's [`Diagnostic`]. A panic anywhere in the
/// pipeline is caught and reported as an `unknown`-stage diagnostic with
/// the panic text attached as its trace.
///
/// # Example
///
/// ```
/// let out = spockc_drv::analyze("1.  True ∧ False .$$").unwrap();
/// assert_eq!(out, "False\n");
/// ```
pub fn analyze(source: &str) -> Result<String, Diagnostic> {
    match catch_unwind(AssertUnwindSafe(|| pipeline(source))) {
        Ok(result) => result,
        Err(payload) => {
            let text = panic_text(payload.as_ref());
            Err(Diagnostic::unknown("internal error while analyzing input").with_trace(text))
        }
    }
}

fn pipeline(source: &str) -> Result<String, Diagnostic> {
    let tokens = spockc_lex::scan(source)?;
    log::debug!("scanner produced {} tokens", tokens.len());

    let rpn = spockc_par::parse(&tokens)?;
    log::debug!("planner produced {} expression lines", rpn.len());

    let output = spockc_eval::evaluate(rpn)?;
    log::debug!("evaluator produced {} bytes of output", output.len());

    Ok(output)
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Perform the caller duties on raw input bytes: lossy UTF-8 decoding and
/// the `$$` terminator append.
pub fn prepare_source(raw: &[u8]) -> String {
    let mut source = String::from_utf8_lossy(raw).into_owned();
    source.push_str("$$");
    source
}

/// What the driver should emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitType {
    /// Evaluated results (the normal mode)
    #[default]
    Result,
    /// The scanner's token stream, one token per line
    Tokens,
    /// The planner's per-line RPN sequences
    Rpn,
}

/// Driver configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Input file; `None` reads stdin
    pub input: Option<PathBuf>,

    /// What to emit
    pub emit: EmitType,

    /// Verbose output (debug logging)
    pub verbose: bool,
}

impl Config {
    /// Parse command-line arguments (everything after the program name).
    ///
    /// # Errors
    ///
    /// A usage message for unknown flags or a second input path.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut config = Config::default();
        for arg in args {
            match arg.as_str() {
                "--emit-tokens" => config.emit = EmitType::Tokens,
                "--emit-rpn" => config.emit = EmitType::Rpn,
                "-v" | "--verbose" => config.verbose = true,
                "-" => config.input = None,
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown option '{}'", flag));
                }
                path => {
                    if config.input.is_some() {
                        return Err("only one input file is supported".to_string());
                    }
                    config.input = Some(PathBuf::from(path));
                }
            }
        }
        Ok(config)
    }
}

/// One driver invocation: a configuration plus the prepared source.
pub struct Session {
    pub config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the configured emission over already-prepared source text.
    ///
    /// # Errors
    ///
    /// The pipeline's [`Diagnostic`], from whichever stage fails first.
    pub fn execute(&self, source: &str) -> Result<String, Diagnostic> {
        match self.config.emit {
            EmitType::Result => analyze(source),
            EmitType::Tokens => {
                let tokens = spockc_lex::scan(source)?;
                let mut out = String::new();
                for token in &tokens {
                    out.push_str(&format!(
                        "{:?} {:?} line {} column {}\n",
                        token.text(),
                        token.kind,
                        token.line,
                        token.column
                    ));
                }
                Ok(out)
            }
            EmitType::Rpn => {
                let tokens = spockc_lex::scan(source)?;
                let rpn = spockc_par::parse(&tokens)?;
                let mut out = String::new();
                for line in &rpn {
                    let texts: Vec<String> =
                        line.iter().map(|t| t.display()).collect();
                    out.push_str(&texts.join(" "));
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }
}
