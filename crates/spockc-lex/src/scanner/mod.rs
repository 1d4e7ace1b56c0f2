//! Scanner module.
//!
//! The scanner is organized into focused components:
//! - `core` - Scanner struct, main loop, token dispatch
//! - `framing` - line-ending normalization, comment stripping, line framing
//! - `identifier` - identifier and keyword scanning
//! - `number` - digit runs and the `0`/`1` boolean promotion
//! - `operator` - two-character fusion and single-character lexicon tokens

mod core;
mod framing;
mod identifier;
mod number;
mod operator;

pub use self::core::scan;
