//! Usage-block extraction and pattern lexer.
//!
//! Grounded in the teacher's `src/meta_usage.rs`, read in reverse: that
//! module *renders* a [`crate::ast::Pattern`]-like `Meta` back into a usage
//! line; this module *lexes* a usage line into the atoms the AST parser
//! (`src/ast.rs`) consumes. Option atoms are resolved against the catalog
//! by delegating straight to [`crate::token::lex_long`] and
//! [`crate::token::lex_short_cluster`] in [`crate::token::LexMode::UsageText`],
//! so a usage pattern's `--speed=<kn>` and an argv's `--speed=20` share
//! exactly one resolution algorithm.

use crate::catalog::Catalog;
use crate::error::LanguageError;
use crate::token::{lex_long, lex_short_cluster, Arg, LexMode};

/// Finds the `usage:` block and returns it verbatim (marker included),
/// plus the text following it to the end of the document (for option
/// description parsing, which scans the whole document anyway — kept here
/// only because callers often want both halves together).
pub fn extract_usage_block(doc: &str) -> Result<&str, LanguageError> {
    let lower = doc.to_ascii_lowercase();
    let marker = "usage:";

    let mut occurrences = lower.match_indices(marker);
    let first = occurrences.next().ok_or(LanguageError::MissingUsage)?;
    if occurrences.next().is_some() {
        return Err(LanguageError::DuplicateUsage);
    }

    let start = first.0;
    let rest = &doc[start..];
    let end = rest.find("\n\n").unwrap_or(rest.len());
    Ok(rest[..end].trim_end())
}

/// Slices `usage_block` to everything after the `usage:` marker. Shared by
/// [`program_name`] and [`formal_usage`] so both agree on where the
/// program name starts.
fn after_marker(usage_block: &str) -> &str {
    &usage_block[usage_block
        .to_ascii_lowercase()
        .find("usage:")
        .expect("caller already located the marker")
        + "usage:".len()..]
}

/// The program-name token immediately following the `usage:` marker — the
/// name every later repetition of is folded into `) | (` by
/// [`formal_usage`]. Exposed so the out-of-scope wrapper can substitute a
/// [`crate::config::Config`] override into rendered help/usage text
/// without re-deriving this from scratch.
pub fn program_name(usage_block: &str) -> Result<&str, LanguageError> {
    after_marker(usage_block)
        .split_whitespace()
        .next()
        .ok_or(LanguageError::TrailingGarbage(
            "usage: section has no program name".to_string(),
        ))
}

/// Builds the *formal usage* string: strips the `usage:` marker and the
/// program name, then turns every subsequent occurrence of the program
/// name into `) | (` and wraps the whole thing in `( ... )` so multiple
/// usage lines become one top-level alternation.
pub fn formal_usage(usage_block: &str) -> Result<String, LanguageError> {
    let mut words = after_marker(usage_block).split_whitespace();
    let program_name = words.next().ok_or(LanguageError::TrailingGarbage(
        "usage: section has no program name".to_string(),
    ))?;

    let mut out_tokens: Vec<String> = Vec::new();
    for w in words {
        if w == program_name {
            out_tokens.push(")".to_string());
            out_tokens.push("|".to_string());
            out_tokens.push("(".to_string());
        } else {
            out_tokens.push(w.to_string());
        }
    }

    Ok(format!("( {} )", out_tokens.join(" ")))
}

/// Inserts spaces around `[`, `]`, `(`, `)`, `|` and `...`, then splits on
/// whitespace.
fn bracket_aware_tokens(s: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(s.len() * 2);
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '.' && chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') {
            spaced.push_str(" ... ");
            i += 3;
            continue;
        }
        match c {
            '[' | ']' | '(' | ')' | '|' => {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            }
            _ => spaced.push(c),
        }
        i += 1;
    }
    spaced.split_whitespace().map(|s| s.to_string()).collect()
}

/// Resolves every option atom in the lexed usage-pattern token stream
/// against `catalog`, synthesizing new prototypes for undeclared options
/// and mapping any remaining lexing fault to a [`LanguageError`] since the
/// document, not argv, is at fault here.
pub fn lex_pattern_tokens(atoms: &[String], catalog: &mut Catalog) -> Result<Vec<Arg>, LanguageError> {
    let mut out = Vec::new();
    let mut iter = atoms.iter().peekable();
    while let Some(atom) = iter.next() {
        if atom == "--" {
            out.push(Arg::DashDash);
        } else if let Some(rest) = atom.strip_prefix("--") {
            if rest.is_empty() {
                out.push(Arg::DashDash);
                continue;
            }
            lex_long(rest, &mut iter, catalog, LexMode::UsageText, &mut out)
                .map_err(user_to_language_error)?;
        } else if atom.starts_with('-') && atom.len() >= 2 {
            lex_short_cluster(&atom[1..], &mut iter, catalog, LexMode::UsageText, &mut out)
                .map_err(user_to_language_error)?;
        } else {
            out.push(Arg::Word(atom.clone()));
        }
    }
    Ok(out)
}

fn user_to_language_error(e: crate::error::UserError) -> LanguageError {
    use crate::error::UserError;
    match e {
        UserError::UnrecognizedLongOption(name) => LanguageError::UnknownLongOption(name),
        UserError::UnrecognizedShortOption(c) => LanguageError::UnknownShortOption(c),
        UserError::AmbiguousLongOption { given, .. } => LanguageError::AmbiguousOption(given),
        UserError::OptionRequiresArgument(name) => LanguageError::OptionMissingMetavar(name),
        UserError::OptionTakesNoArgument(name) => LanguageError::OptionArityMismatch(name),
        UserError::NoMatch => unreachable!("NoMatch is never raised while lexing"),
    }
}

/// Full pipeline: usage block → formal usage string → bracket-aware atoms →
/// resolved token stream, ready for [`crate::ast::parse_pattern`].
pub fn lex_usage(doc: &str, catalog: &mut Catalog) -> Result<Vec<Arg>, LanguageError> {
    let block = extract_usage_block(doc)?;
    let formal = formal_usage(block)?;
    let atoms = bracket_aware_tokens(&formal);
    lex_pattern_tokens(&atoms, catalog)
}
