//! A command line argument parser driven entirely by a help text.
//!
//! Write the `usage:` block and option descriptions you'd put in a
//! `--help` message anyway; this crate compiles that text into a pattern,
//! matches it against `argv`, and hands back a map from option/argument/
//! command names to their values. No combinators, no derive macro, no
//! parser specification beyond the text a user would read.
//!
//! ```
//! use docargs::parse;
//!
//! let doc = "\
//! Usage:
//!   prog ship [<name>] move <x> <y> [--speed=<kn>]
//!
//! Options:
//!   --speed=<kn>  speed in knots [default: 10]
//! ";
//!
//! let argv: Vec<String> = ["ship", "Guardian", "move", "150", "300", "--speed=20"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let bindings = parse(doc, &argv).unwrap();
//! assert_eq!(bindings.get("<x>").unwrap().as_str(), Some("150"));
//! assert_eq!(bindings.get("--speed").unwrap().as_str(), Some("20"));
//! ```
//!
//! # Layout
//!
//! The core pipeline, leaves first: [`value`] and [`bindings`] (the
//! result type), [`error`] (the two-kind error channel), [`catalog`]
//! (option prototypes), [`token`] (the argv/usage-text lexer), [`usage`]
//! (usage-block extraction and pattern lexing), [`ast`] (the pattern
//! tree), [`listargs`] (list-typed argument marking), [`nfa`] (the
//! compiled automaton), [`matcher`] (frontier traversal) and [`assemble`]
//! (merging defaults with matched bindings). [`doc`] ties compilation
//! together; [`wrapper`] (re-exported at the crate root as [`parse`]) is
//! the thin, out-of-scope CLI convenience layer, backed by [`config`] and
//! [`buffer`].

pub mod ast;
pub mod assemble;
pub mod bindings;
pub mod buffer;
pub mod catalog;
pub mod config;
pub mod doc;
pub mod error;
pub mod listargs;
pub mod matcher;
pub mod nfa;
pub mod token;
pub mod usage;
pub mod value;
pub mod wrapper;

pub use bindings::Bindings;
pub use config::Config;
pub use error::{Error, LanguageError, UserError};
pub use value::Value;
pub use wrapper::{parse, parse_with, render_error, render_help, render_version};
