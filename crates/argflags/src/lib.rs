//! Typed command-line flags with validation, help rendering and
//! "did you mean" suggestions.
//!
//! A program declares its flags on a [`FlagRegistry`], then hands the raw
//! tokens (program path first) to a [`Parser`]:
//! - `Int`, `Bool` and `String` flags, each with aliases, a description, an
//!   optional default and required-ness
//! - `flag value` pairs and bare boolean switches (no `--flag=value`, no `-abc`)
//! - an implicit `-h`/`--help` flag and generated usage/help text
//! - edit-distance suggestions for mistyped flag names
//!
//! Diagnostic text goes through a [`DiagnosticSink`], so callers decide where
//! it is shown.

pub mod distance;
pub mod error;
pub mod flag;
pub mod help;
pub mod parser;
pub mod registry;
pub mod sink;
pub mod suggest;

pub use distance::{Metric, levenshtein};
pub use error::{FlagError, Result, Warning};
pub use flag::{FlagKind, FlagSpec, FlagValue};
pub use parser::{ParseOptions, ParsedFlags, Parser};
pub use registry::FlagRegistry;
pub use sink::{DiagnosticSink, StdoutSink};
pub use suggest::{Candidate, SuggestOptions, find_closest};
