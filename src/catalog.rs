//! The option catalog. Parses description lines out of a help document
//! into [`OptionProto`] prototypes, and is consulted again while lexing
//! both the usage pattern and the user's argv to resolve prefixes and
//! clusters.
//!
//! Grounded in [`crate::LanguageError::DuplicateOption`]-style identity
//! tracking: a prototype's identity for equality purposes is `(short,
//! long)`, matching the teacher's [`crate::item::ShortLong`] (`src/item.rs`)
//! which is likewise keyed by short/long alone, never by arity or default.

use crate::error::LanguageError;

/// Arity of an option: how many argv tokens it consumes besides itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// A flag: presence alone is the value.
    Zero,
    /// Takes exactly one value, either attached (`--foo=x`, `-fx`) or as
    /// the following argv token.
    One,
}

/// A declared option, as found in the descriptions block or synthesized
/// while lexing the usage text or argv.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionProto {
    pub short: Option<char>,
    pub long: Option<String>,
    pub arity: Arity,
    /// `None` means "no default" (arity-1 options with no `[default: X]`).
    /// Arity-0 options always default to `false`, modeled as `Some("false")`
    /// is wrong for booleans — see [`OptionProto::default_value`].
    pub default: Option<String>,
}

impl OptionProto {
    pub fn new(short: Option<char>, long: Option<String>, arity: Arity) -> Self {
        OptionProto {
            short,
            long,
            arity,
            default: None,
        }
    }

    /// Identity used for equality throughout the pipeline: short and long
    /// form together, ignoring arity and default.
    pub fn identity(&self) -> (Option<char>, Option<&str>) {
        (self.short, self.long.as_deref())
    }

    /// The display name used as a result-map key: long form if present,
    /// else short.
    pub fn display_name(&self) -> String {
        match (&self.short, &self.long) {
            (_, Some(l)) => format!("--{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, None) => unreachable!("option prototype with neither short nor long form"),
        }
    }

    pub fn default_value(&self) -> crate::value::Value {
        match self.arity {
            Arity::Zero => crate::value::Value::Bool(false),
            Arity::One => match &self.default {
                Some(d) => crate::value::Value::Str(d.clone()),
                None => crate::value::Value::Null,
            },
        }
    }
}

/// The full set of declared options, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    protos: Vec<OptionProto>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionProto> {
        self.protos.iter()
    }

    pub fn find_by_identity(
        &self,
        short: Option<char>,
        long: Option<&str>,
    ) -> Option<&OptionProto> {
        self.protos
            .iter()
            .find(|p| p.identity() == (short, long))
    }

    pub fn find_by_short(&self, c: char) -> Option<&OptionProto> {
        self.protos.iter().find(|p| p.short == Some(c))
    }

    /// All prototypes whose long form starts with `prefix`.
    pub fn long_prefix_matches(&self, prefix: &str) -> Vec<&OptionProto> {
        self.protos
            .iter()
            .filter(|p| p.long.as_deref().is_some_and(|l| l.starts_with(prefix)))
            .collect()
    }

    pub fn find_exact_long(&self, name: &str) -> Option<&OptionProto> {
        self.protos.iter().find(|p| p.long.as_deref() == Some(name))
    }

    /// Registers a new prototype, or merges arity information into an
    /// existing one with the same identity. Used both for declarations
    /// found in the descriptions block and for options auto-registered
    /// while lexing the usage text when a long option there has no
    /// existing prefix match.
    pub fn register(&mut self, proto: OptionProto) -> Result<(), LanguageError> {
        if let Some(existing) = self
            .protos
            .iter()
            .position(|p| p.identity() == proto.identity())
        {
            if self.protos[existing].arity != proto.arity {
                return Err(LanguageError::DuplicateOption(proto.display_name()));
            }
            if proto.default.is_some() {
                self.protos[existing].default = proto.default;
            }
            return Ok(());
        }
        self.protos.push(proto);
        Ok(())
    }

    pub fn push_unchecked(&mut self, proto: OptionProto) {
        self.protos.push(proto);
    }

    pub fn len(&self) -> usize {
        self.protos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protos.is_empty()
    }
}

/// Parses the descriptions block: any line whose first non-blank character
/// is `-`.
pub fn parse_descriptions(doc: &str) -> Result<Catalog, LanguageError> {
    let mut catalog = Catalog::new();
    for line in doc.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with('-') {
            continue;
        }
        let (signature, description) = split_signature(trimmed);
        let proto = parse_signature(signature)?;
        let proto = apply_default(proto, description);
        // Two description lines for the same option is undefined upstream;
        // resolved here as a hard language-error.
        if catalog
            .find_by_identity(proto.short, proto.long.as_deref())
            .is_some()
        {
            return Err(LanguageError::DuplicateOption(proto.display_name()));
        }
        catalog.push_unchecked(proto);
    }
    Ok(catalog)
}

/// Splits a description line at the first run of two-or-more spaces.
fn split_signature(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b' ' && bytes[i + 1] == b' ' {
            return (line[..i].trim_end(), line[i..].trim_start());
        }
        i += 1;
    }
    (line.trim_end(), "")
}

fn parse_signature(signature: &str) -> Result<OptionProto, LanguageError> {
    let cleaned = signature.replace([',', '='], " ");
    let mut short = None;
    let mut long = None;
    let mut arity = Arity::Zero;
    for tok in cleaned.split_whitespace() {
        if let Some(rest) = tok.strip_prefix("--") {
            if !rest.is_empty() {
                long = Some(rest.to_string());
            }
        } else if tok.starts_with('-') && tok.len() >= 2 {
            let c = tok[1..].chars().next().unwrap();
            short = Some(c);
        } else {
            arity = Arity::One;
        }
    }
    if short.is_none() && long.is_none() {
        return Err(LanguageError::TrailingGarbage(signature.to_string()));
    }
    Ok(OptionProto::new(short, long, arity))
}

/// Scans `[default: X]` (case-insensitive) out of the free-text description.
fn apply_default(mut proto: OptionProto, description: &str) -> OptionProto {
    if proto.arity != Arity::One {
        return proto;
    }
    let lower = description.to_ascii_lowercase();
    if let Some(start) = lower.find("[default:") {
        let rest = &description[start + "[default:".len()..];
        if let Some(end) = rest.find(']') {
            proto.default = Some(rest[..end].trim().to_string());
        }
    }
    proto
}
