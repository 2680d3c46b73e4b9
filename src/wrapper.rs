//! The thin, out-of-scope CLI wrapper. Composes the core's two interfaces
//! — `compile(doc) -> (pattern, catalog)` ([`crate::doc::compile`]) and
//! `match(pattern, tokens, catalog) -> bindings | error`
//! ([`crate::matcher::run`]) — into a single convenience entry point, plus
//! auto `-h`/`--help`/`--version` handling and colored error rendering.
//! Grounded in the teacher's `src/lib.rs` `run`-then-`run_inner` split:
//! parse first, then decide how to report.

use crate::assemble::assemble;
use crate::bindings::Bindings;
use crate::buffer::{Doc, Style};
use crate::catalog::{Arity, OptionProto};
use crate::config::Config;
use crate::error::Error;
use crate::token::{lex, Arg, LexMode};

/// `parse(doc, argv) -> bindings | error`, with the default [`Config`]
/// (auto `-h`/`--help`/`--version`, no program-name override, no version
/// text).
pub fn parse(doc: &str, argv: &[String]) -> Result<Bindings, Error> {
    parse_with(doc, argv, &Config::default())
}

/// Same as [`parse`] but with an explicit [`Config`].
pub fn parse_with(doc: &str, argv: &[String], config: &Config) -> Result<Bindings, Error> {
    let (pattern, mut catalog) = crate::doc::compile(doc).map_err(Error::Language)?;

    if config.auto_help
        && catalog.find_by_short('h').is_none()
        && catalog.find_exact_long("help").is_none()
    {
        catalog
            .register(OptionProto::new(Some('h'), Some("help".to_string()), Arity::Zero))
            .expect("freshly synthesized -h/--help cannot collide");
    }
    if config.auto_version && catalog.find_exact_long("version").is_none() {
        catalog
            .register(OptionProto::new(None, Some("version".to_string()), Arity::Zero))
            .expect("freshly synthesized --version cannot collide");
    }

    let lexed = lex(argv, &mut catalog, LexMode::Argv).map_err(Error::User)?;

    if requests_help(&lexed) {
        return Err(Error::Help(render_help(doc, config)));
    }
    if requests_version(&lexed) {
        return Err(Error::Version(render_version(config)));
    }

    let (entry, arena) = crate::nfa::compile(&pattern).map_err(Error::Language)?;
    let matched = crate::matcher::run(entry, &arena, lexed.clone())?;
    Ok(assemble(&catalog, &pattern, &lexed, matched))
}

fn requests_help(args: &crate::token::Args) -> bool {
    args.items().iter().any(|item| {
        matches!(item, Arg::Option(r) if r.short == Some('h') || r.long.as_deref() == Some("help"))
    })
}

fn requests_version(args: &crate::token::Args) -> bool {
    args.items()
        .iter()
        .any(|item| matches!(item, Arg::Option(r) if r.long.as_deref() == Some("version")))
}

/// Renders `--help` output: the help document verbatim (with
/// [`Config::program_name`] substituted for the inferred program name, if
/// set), the `usage:` marker itself picked out as a section header via
/// the color-feature-gated buffer.
pub fn render_help(doc: &str, config: &Config) -> String {
    let substituted = substitute_program_name(doc, config);
    let mut out = Doc::new();
    for line in substituted.trim_end().lines() {
        if line.trim_start().to_ascii_lowercase().starts_with("usage:") {
            out.section(line.to_string());
        } else {
            out.text(line.to_string());
        }
        out.newline();
    }
    out.render()
}

/// Replaces every whitespace-delimited occurrence of the inferred program
/// name token with [`Config::program_name`], if the override is set and the
/// document's usage block parses cleanly. Falls back to `doc` unchanged on
/// any failure to extract a program name — this is a display nicety, not
/// something worth surfacing a [`crate::error::LanguageError`] over.
fn substitute_program_name(doc: &str, config: &Config) -> String {
    let Some(replacement) = &config.program_name else {
        return doc.to_string();
    };
    let Ok(block) = crate::usage::extract_usage_block(doc) else {
        return doc.to_string();
    };
    let Ok(original) = crate::usage::program_name(block) else {
        return doc.to_string();
    };
    if original == replacement {
        return doc.to_string();
    }
    doc.lines()
        .map(|line| {
            line.split_inclusive(char::is_whitespace)
                .map(|tok| {
                    let trimmed = tok.trim_end();
                    if trimmed == original {
                        format!("{replacement}{}", &tok[trimmed.len()..])
                    } else {
                        tok.to_string()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `--version` output: the configured version string, or an
/// empty line if none was set (an app that enables `auto_version` without
/// supplying one gets a blank line rather than a panic).
pub fn render_version(config: &Config) -> String {
    config.version.clone().unwrap_or_default()
}

/// Renders any [`Error`] for display to the end user: `Help`/`Version`
/// are printed as-is (they already carry their full text); `Language`
/// errors get a short diagnostic only, since there's no argv-facing usage
/// text to show for a developer's own mistake; `User` errors get the
/// message plus the extracted usage block verbatim beneath it, with
/// [`Config::program_name`] substituted in if set.
pub fn render_error(err: &Error, doc: &str, config: &Config) -> String {
    match err {
        Error::Help(text) | Error::Version(text) => text.clone(),
        Error::Language(e) => {
            let mut out = Doc::new();
            out.invalid(format!("error: {e}"));
            out.render()
        }
        Error::User(e) => {
            let mut out = Doc::new();
            out.invalid(format!("error: {e}"));
            out.newline();
            out.newline();
            let substituted = substitute_program_name(doc, config);
            if let Ok(usage_block) = crate::usage::extract_usage_block(&substituted) {
                out.section(usage_block.to_string());
            }
            out.render()
        }
    }
}
