//! Ties the catalog and usage parsers together into the single
//! `compile(doc) -> (Pattern, Catalog)` entry point the core exposes to its
//! out-of-scope caller. Grounded in the teacher's `src/info.rs`, which
//! plays the same "one struct/function owns the parsed artifacts
//! together" role for a `Meta` plus its rendering knobs.

use crate::ast::Pattern;
use crate::catalog::Catalog;
use crate::error::LanguageError;
use crate::listargs::mark_list_arguments;

/// Parses `doc` into a compiled pattern and its option catalog:
///
/// 1. [`crate::catalog::parse_descriptions`] scans the whole document for
///    option description lines.
/// 2. [`crate::ast::compile_pattern`] extracts the usage block and parses
///    it against that catalog, growing it with any option the usage text
///    references but the descriptions block didn't declare.
/// 3. [`mark_list_arguments`] threads list-typed marks into the live tree
///    before the caller hands the pattern to [`crate::nfa::compile`].
pub fn compile(doc: &str) -> Result<(Pattern, Catalog), LanguageError> {
    let mut catalog = crate::catalog::parse_descriptions(doc)?;
    let mut pattern = crate::ast::compile_pattern(doc, &mut catalog)?;
    mark_list_arguments(&mut pattern);
    Ok((pattern, catalog))
}
