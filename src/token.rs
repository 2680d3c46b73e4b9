//! The token model and the argv lexer.
//!
//! `Arg` and the overall consume-and-return-remainder shape of [`Args`] are
//! carried over from the teacher's `src/args.rs` almost unchanged — short
//! clustering, `--long=value`, bare `--`. What's new is that resolution
//! happens against a [`Catalog`] instead of against a single parser's
//! fixed short/long pair, since this crate doesn't know what options exist
//! until it has read the help text.

use crate::catalog::{Arity, Catalog, OptionProto};
use crate::error::UserError;

/// One lexed argv token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// A resolved option occurrence, carrying its value for arity-1
    /// options (`true` is encoded separately via [`Arg::value`] being
    /// `None` — see [`ResolvedOption`]).
    Option(ResolvedOption),
    /// A positional token: a plain word, or anything after `--`.
    Word(String),
    /// The literal `--` separator itself. Kept as a token (rather than
    /// silently dropped) so the matcher can bind it when a pattern
    /// explicitly mentions `--`.
    DashDash,
}

/// A single resolved option occurrence in the lexed token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOption {
    pub short: Option<char>,
    pub long: Option<String>,
    /// `Some(v)` for arity-1 options, `None` for arity-0 (flag is simply
    /// present; its value is always boolean `true`).
    pub value: Option<String>,
}

impl ResolvedOption {
    pub fn identity(&self) -> (Option<char>, Option<&str>) {
        (self.short, self.long.as_deref())
    }

    pub fn from_proto(proto: &OptionProto, value: Option<String>) -> Self {
        ResolvedOption {
            short: proto.short,
            long: proto.long.clone(),
            value,
        }
    }
}

/// Whether unresolved prefixes/clusters should synthesize a new catalog
/// entry (usage-text lexing) or fail as a user error (argv lexing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexMode {
    UsageText,
    Argv,
}

/// The flat, lexed argv (or usage-text option references). Mutated in
/// place by the matcher's leaf-consume rules via `remove_*`, mirroring the
/// teacher's `Args::take_*` "consume and return remainder" API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    items: Vec<Arg>,
}

impl Args {
    pub fn items(&self) -> &[Arg] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Removes and returns the first positional `Word`, leaving options in
    /// place.
    pub fn remove_first_word(&mut self) -> Option<String> {
        let ix = self.items.iter().position(|a| matches!(a, Arg::Word(_)))?;
        match self.items.remove(ix) {
            Arg::Word(w) => Some(w),
            _ => unreachable!(),
        }
    }

    /// Removes the first positional `Word` only if it equals `name`
    /// exactly.
    pub fn remove_command(&mut self, name: &str) -> Option<bool> {
        let ix = self.items.iter().position(|a| matches!(a, Arg::Word(_)))?;
        match &self.items[ix] {
            Arg::Word(w) if w == name => {
                self.items.remove(ix);
                Some(true)
            }
            Arg::Word(_) => None,
            _ => unreachable!(),
        }
    }

    /// Removes every option occurrence matching `identity`, scanning from
    /// the right. Returns the resolved values found, in left-to-right
    /// order.
    pub fn remove_option(&mut self, identity: (Option<char>, Option<&str>)) -> Vec<ResolvedOption> {
        let mut found = Vec::new();
        let mut ix = self.items.len();
        while ix > 0 {
            ix -= 1;
            if let Arg::Option(r) = &self.items[ix] {
                if r.identity() == identity {
                    if let Arg::Option(r) = self.items.remove(ix) {
                        found.push(r);
                    }
                }
            }
        }
        found.reverse();
        found
    }

    /// Removes every option occurrence, scanning from the right. Always
    /// succeeds, including zero removals.
    pub fn remove_all_options(&mut self) -> Vec<ResolvedOption> {
        let mut found = Vec::new();
        let mut ix = self.items.len();
        while ix > 0 {
            ix -= 1;
            if matches!(self.items[ix], Arg::Option(_)) {
                if let Arg::Option(r) = self.items.remove(ix) {
                    found.push(r);
                }
            }
        }
        found.reverse();
        found
    }

    /// Removes the `--` sentinel token if present at the front remaining
    /// positionals (used when a pattern leaf explicitly names `--`).
    pub fn remove_dashdash(&mut self) -> Option<()> {
        let ix = self.items.iter().position(|a| matches!(a, Arg::DashDash))?;
        self.items.remove(ix);
        Some(())
    }

    pub fn has_dashdash(&self) -> bool {
        self.items.iter().any(|a| matches!(a, Arg::DashDash))
    }
}

/// Lexes a raw argv vector into [`Args`], resolving long-option prefixes
/// and short-option clusters against `catalog`. In [`LexMode::UsageText`]
/// mode, unresolved prefixes/clusters are synthesized into new catalog
/// entries rather than raising a user error.
pub fn lex(
    argv: &[String],
    catalog: &mut Catalog,
    mode: LexMode,
) -> Result<Args, UserError> {
    let mut items = Vec::new();
    let mut iter = argv.iter().peekable();
    let mut positional_only = false;

    while let Some(tok) = iter.next() {
        if positional_only {
            items.push(Arg::Word(tok.clone()));
            continue;
        }
        if tok == "--" {
            items.push(Arg::DashDash);
            positional_only = true;
        } else if let Some(rest) = tok.strip_prefix("--") {
            if rest.is_empty() {
                unreachable!("handled by the \"--\" check above");
            }
            lex_long(rest, &mut iter, catalog, mode, &mut items)?;
        } else if tok.starts_with('-') && tok.len() >= 2 {
            lex_short_cluster(&tok[1..], &mut iter, catalog, mode, &mut items)?;
        } else {
            items.push(Arg::Word(tok.clone()));
        }
    }

    Ok(Args { items })
}

pub(crate) fn lex_long<'a, I: Iterator<Item = &'a String>>(
    rest: &str,
    iter: &mut std::iter::Peekable<I>,
    catalog: &mut Catalog,
    mode: LexMode,
    out: &mut Vec<Arg>,
) -> Result<(), UserError> {
    let (raw, attached) = match rest.split_once('=') {
        Some((r, v)) => (r, Some(v.to_string())),
        None => (rest, None),
    };

    let matches = catalog.long_prefix_matches(raw);
    let proto = match matches.len() {
        0 => match mode {
            LexMode::UsageText => {
                let arity = if attached.is_some() { Arity::One } else { Arity::Zero };
                let synthesized = OptionProto::new(None, Some(raw.to_string()), arity);
                catalog
                    .register(synthesized.clone())
                    .expect("freshly synthesized prototype cannot collide");
                synthesized
            }
            LexMode::Argv => {
                return Err(UserError::UnrecognizedLongOption(raw.to_string()));
            }
        },
        1 => matches[0].clone(),
        _ => {
            let mut candidates: Vec<String> =
                matches.iter().map(|p| p.display_name()).collect();
            candidates.sort();
            return Err(UserError::AmbiguousLongOption {
                given: raw.to_string(),
                candidates,
            });
        }
    };

    match proto.arity {
        Arity::One => {
            let value = match attached {
                Some(v) => v,
                None => match iter.next() {
                    Some(v) => v.clone(),
                    None => {
                        return Err(UserError::OptionRequiresArgument(proto.display_name()));
                    }
                },
            };
            out.push(Arg::Option(ResolvedOption::from_proto(&proto, Some(value))));
        }
        Arity::Zero => {
            if attached.is_some() {
                return Err(UserError::OptionTakesNoArgument(proto.display_name()));
            }
            out.push(Arg::Option(ResolvedOption::from_proto(&proto, None)));
        }
    }
    Ok(())
}

pub(crate) fn lex_short_cluster<'a, I: Iterator<Item = &'a String>>(
    cluster: &str,
    iter: &mut std::iter::Peekable<I>,
    catalog: &mut Catalog,
    mode: LexMode,
    out: &mut Vec<Arg>,
) -> Result<(), UserError> {
    let mut chars = cluster.char_indices();
    while let Some((byte_ix, c)) = chars.next() {
        if c == '=' {
            // `-s=12`: treat everything after `=` as the value for the
            // flag just consumed, requires exactly one preceding flag.
            break;
        }
        let proto = match catalog.find_by_short(c) {
            Some(p) => p.clone(),
            None => match mode {
                LexMode::UsageText => {
                    let synthesized = OptionProto::new(Some(c), None, Arity::Zero);
                    catalog
                        .register(synthesized.clone())
                        .expect("freshly synthesized prototype cannot collide");
                    synthesized
                }
                LexMode::Argv => return Err(UserError::UnrecognizedShortOption(c)),
            },
        };

        match proto.arity {
            Arity::Zero => {
                out.push(Arg::Option(ResolvedOption::from_proto(&proto, None)));
            }
            Arity::One => {
                let remainder = &cluster[byte_ix + c.len_utf8()..];
                let remainder = remainder.strip_prefix('=').unwrap_or(remainder);
                let value = if !remainder.is_empty() {
                    remainder.to_string()
                } else {
                    match iter.next() {
                        Some(v) => v.clone(),
                        None => {
                            return Err(UserError::OptionRequiresArgument(proto.display_name()));
                        }
                    }
                };
                out.push(Arg::Option(ResolvedOption::from_proto(&proto, Some(value))));
                return Ok(());
            }
        }
    }
    Ok(())
}
