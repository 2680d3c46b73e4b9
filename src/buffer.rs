//! A small styled-text builder for the out-of-scope CLI wrapper: usage
//! text, error messages, `--help`/`--version` output.
//!
//! The core engine (catalog/usage/ast/nfa/matcher/assemble) never touches
//! this module — it stays colorless, as the spec requires. Grounded in the
//! teacher's `color.rs`/`no_color.rs` macro pair (`w_section!`/`w_err!`/
//! `w_flag!`, each with a `color`-feature and a no-`color` arm calling
//! `owo_colors::OwoColorize::if_supports_color`), adapted here into a
//! `Doc` struct that accumulates `(text, Style)` spans instead of writing
//! macros directly into a caller's buffer — the wrapper only ever wants a
//! flat string, never a templated `write!` target.

/// The role a span of text plays, used to pick an ANSI style when the
/// `color` feature is enabled and the output stream supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Plain text, no decoration.
    Text,
    /// A section header: "Usage:", "Options:".
    Section,
    /// Something the user must type literally: a flag, a command name.
    Literal,
    /// The offending part of a user error.
    Invalid,
}

/// A flat string with per-span style tags, rendered to plain text or to
/// ANSI-styled text depending on the `color` feature and the output
/// stream's capabilities (mirrors the teacher's `Color::Monochrome` /
/// `Dull` / `Bright` split in `src/buffer/console.rs`, minus manpage/HTML
/// rendering, which this crate has no use for).
#[derive(Debug, Clone, Default)]
pub struct Doc {
    spans: Vec<(String, Style)>,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        self.spans.push((text.into(), style));
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.push(text, Style::Text);
    }

    pub fn section(&mut self, text: impl Into<String>) {
        self.push(text, Style::Section);
    }

    pub fn literal(&mut self, text: impl Into<String>) {
        self.push(text, Style::Literal);
    }

    pub fn invalid(&mut self, text: impl Into<String>) {
        self.push(text, Style::Invalid);
    }

    pub fn newline(&mut self) {
        self.text("\n");
    }

    /// Renders to a plain string, no ANSI escapes, regardless of feature
    /// flags — used whenever the destination isn't a terminal we've
    /// checked (tests, piped output captured as a string).
    pub fn render_plain(&self) -> String {
        self.spans.iter().map(|(s, _)| s.as_str()).collect()
    }

    /// Renders with ANSI styling applied per-span when the `color`
    /// feature is enabled and `supports-color` reports the stream can
    /// take it; falls back to [`Doc::render_plain`] otherwise.
    pub fn render(&self) -> String {
        render_styled(&self.spans)
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Self {
        let mut doc = Doc::new();
        doc.text(s);
        doc
    }
}

impl std::fmt::Display for Doc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(feature = "color")]
fn render_styled(spans: &[(String, Style)]) -> String {
    use owo_colors::{OwoColorize, Stream};

    if supports_color::on(Stream::Stdout).is_none() {
        return spans.iter().map(|(s, _)| s.as_str()).collect();
    }

    let mut out = String::new();
    for (text, style) in spans {
        match style {
            Style::Text => out.push_str(text),
            Style::Section => {
                out.push_str(&text.if_supports_color(Stream::Stdout, OwoColorize::bold).to_string())
            }
            Style::Literal => {
                out.push_str(&text.if_supports_color(Stream::Stdout, OwoColorize::green).to_string())
            }
            Style::Invalid => {
                out.push_str(&text.if_supports_color(Stream::Stdout, OwoColorize::red).to_string())
            }
        }
    }
    out
}

#[cfg(not(feature = "color"))]
fn render_styled(spans: &[(String, Style)]) -> String {
    spans.iter().map(|(s, _)| s.as_str()).collect()
}
