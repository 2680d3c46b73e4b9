//! The wrapper's only "configuration": the document and the argv are the
//! real input, so this is a small struct of display knobs rather than a
//! config-file/env-var layer. Mirrors the teacher's own `config.rs` in
//! spirit — one small struct with defaults — though the teacher's version
//! is a different, env-cursor-reading mechanism this crate has no use
//! for.

/// Display knobs for [`crate::wrapper::parse_with`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Overrides the program name used when rendering usage text on
    /// error, instead of the name inferred from the `usage:` line's
    /// first token.
    pub program_name: Option<String>,
    /// Auto-register `-h`/`--help` when the document doesn't already
    /// declare it.
    pub auto_help: bool,
    /// Auto-register `--version` when the document doesn't already
    /// declare it.
    pub auto_version: bool,
    /// The text to print for `--version`, if auto-registered.
    pub version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            program_name: None,
            auto_help: true,
            auto_version: true,
            version: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn no_auto_help(mut self) -> Self {
        self.auto_help = false;
        self
    }

    pub fn no_auto_version(mut self) -> Self {
        self.auto_version = false;
        self
    }
}
