//! Two error kinds, no fall-through: a malformed *document* is the
//! developer's fault ([`LanguageError`]), a malformed *argv* is the end
//! user's ([`UserError`]). Mirrors the teacher's split between an internal
//! `Message` detail enum and the public `Error` wrapper in `src/error.rs`,
//! without reaching for `thiserror` or `anyhow` — the teacher hand-writes
//! `Display` and so do we.

use std::fmt;

/// A fault in the help document itself. Terminal for the developer: no
/// amount of different argv will fix it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageError {
    /// No `usage:` marker found in the document.
    MissingUsage,
    /// More than one `usage:` marker found in the document.
    DuplicateUsage,
    /// A `[`, `]`, `(` or `)` in the usage pattern has no matching partner.
    UnbalancedBracket,
    /// Tokens remained after the pattern grammar finished parsing.
    TrailingGarbage(String),
    /// A long option mentioned in the usage text is not declared in the
    /// descriptions block and cannot be auto-registered there (auto
    /// registration only happens while parsing the usage text itself).
    UnknownLongOption(String),
    /// A short option mentioned in the usage text is not declared.
    UnknownShortOption(char),
    /// The same option (by short or long form) is declared more than once
    /// in the descriptions block, or declared twice with incompatible
    /// arity between the usage text and the descriptions block.
    DuplicateOption(String),
    /// An `Either` or `OneOrMore` or `Optional` combinator ended up with
    /// fewer children than the grammar requires.
    EmptyCombinator(&'static str),
    /// The compiled pattern's live-frontier-path guard tripped; see
    /// [`crate::matcher::MAX_FRONTIER_WIDTH`].
    PatternTooComplex,
    /// `--f` inside the usage text is a prefix of two or more declared
    /// long options.
    AmbiguousOption(String),
    /// An option referenced in the usage text is declared with arity 1
    /// but the usage text gives it no adjacent metavar token to consume.
    OptionMissingMetavar(String),
    /// An option referenced in the usage text is declared with arity 0 but
    /// is written with an attached `=value` in the usage text.
    OptionArityMismatch(String),
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::MissingUsage => {
                write!(f, "no \"usage:\" section found in the help text")
            }
            LanguageError::DuplicateUsage => {
                write!(f, "more than one \"usage:\" section found in the help text")
            }
            LanguageError::UnbalancedBracket => {
                write!(f, "unbalanced brackets in usage pattern")
            }
            LanguageError::TrailingGarbage(rest) => {
                write!(f, "unexpected trailing text in usage pattern: {rest:?}")
            }
            LanguageError::UnknownLongOption(name) => {
                write!(f, "{name} is not declared in the options section")
            }
            LanguageError::UnknownShortOption(c) => {
                write!(f, "-{c} is not declared in the options section")
            }
            LanguageError::DuplicateOption(name) => {
                write!(f, "{name} is declared more than once")
            }
            LanguageError::EmptyCombinator(kind) => {
                write!(f, "{kind} has no children")
            }
            LanguageError::PatternTooComplex => {
                write!(f, "usage pattern is too complex to match")
            }
            LanguageError::AmbiguousOption(given) => {
                write!(f, "{given} in the usage text is ambiguous")
            }
            LanguageError::OptionMissingMetavar(name) => {
                write!(f, "{name} is declared to take a value but the usage text gives it none")
            }
            LanguageError::OptionArityMismatch(name) => {
                write!(f, "{name} is declared as a flag but the usage text gives it a value")
            }
        }
    }
}

/// A fault in the user-supplied argv. Recoverable only by the user supplying
/// different arguments; the wrapper typically prints usage and exits
/// nonzero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserError {
    /// `--foo` where no declared long option has `foo` as a prefix.
    UnrecognizedLongOption(String),
    /// `-x` where no declared short option is `x`.
    UnrecognizedShortOption(char),
    /// `--f` is a prefix of two or more declared long options.
    AmbiguousLongOption {
        given: String,
        candidates: Vec<String>,
    },
    /// An arity-1 option ran out of argv before finding its value.
    OptionRequiresArgument(String),
    /// An arity-0 option was given `=value`.
    OptionTakesNoArgument(String),
    /// No branch of the usage pattern matched the given argv.
    NoMatch,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::UnrecognizedLongOption(s) => write!(f, "unrecognized option '--{s}'"),
            UserError::UnrecognizedShortOption(c) => write!(f, "unrecognized option '-{c}'"),
            UserError::AmbiguousLongOption { given, candidates } => {
                write!(
                    f,
                    "'--{given}' is ambiguous, could be: {}",
                    candidates.join(", ")
                )
            }
            UserError::OptionRequiresArgument(s) => write!(f, "{s} requires an argument"),
            UserError::OptionTakesNoArgument(s) => write!(f, "{s} takes no argument"),
            UserError::NoMatch => write!(f, "arguments did not match any usage pattern"),
        }
    }
}

/// The union of everything [`crate::wrapper::parse`] can return besides a
/// successful binding map.
///
/// `Help` and `Version` are not parse failures — they're deliberately
/// carved out as a third outcome, neither `language-error` nor
/// `user-error`, because the caller's required reaction (print to
/// stdout, exit 0)
/// differs from a `user-error`'s (print usage to stderr, exit nonzero).
/// They only ever arise from the wrapper's auto-registered `-h`/`--help`/
/// `--version` options short-circuiting after an otherwise successful
/// match; the core `compile`/`match` interfaces never produce them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Language(LanguageError),
    User(UserError),
    /// Carries the rendered `--help` text.
    Help(String),
    /// Carries the rendered `--version` text.
    Version(String),
}

impl Error {
    pub fn is_language_error(&self) -> bool {
        matches!(self, Error::Language(_))
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::User(_))
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help(_))
    }

    pub fn is_version(&self) -> bool {
        matches!(self, Error::Version(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Language(e) => write!(f, "{e}"),
            Error::User(e) => write!(f, "{e}"),
            Error::Help(text) | Error::Version(text) => f.write_str(text),
        }
    }
}

impl std::error::Error for Error {}

impl From<LanguageError> for Error {
    fn from(e: LanguageError) -> Self {
        Error::Language(e)
    }
}

impl From<UserError> for Error {
    fn from(e: UserError) -> Self {
        Error::User(e)
    }
}
