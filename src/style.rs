//! Styled-span rendering.
//!
//! A [`Painter`] turns one span of text plus a [`ColorSpec`] into a `String`
//! carrying inline escape sequences (or the text unchanged when colour is
//! off). Rendering to values rather than straight to a stream keeps every
//! line atomic: a filter either produces a fully styled line or none at all.
//!
//! The [`palette`] module names every hue the filters use, mirroring the
//! valgrind-output colour conventions (dim frame prefixes, yellow addresses,
//! bright cyan function names, and so on).

use std::io::Write;

use termcolor::{Buffer, ColorSpec, WriteColor};

/// Renders styled spans into strings.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    coloured: bool,
}

impl Painter {
    pub fn new(coloured: bool) -> Self {
        Self { coloured }
    }

    pub fn coloured(&self) -> bool {
        self.coloured
    }

    /// Wraps `text` in the escape sequences for `spec`, always closing the
    /// style before returning. With colour off this is the identity on
    /// content, which is also what makes the strip-styling round-trip hold.
    pub fn paint(&self, spec: &ColorSpec, text: &str) -> String {
        if !self.coloured || text.is_empty() {
            return text.to_string();
        }
        let mut buf = Buffer::ansi();
        let _ = buf.set_color(spec);
        let _ = write!(buf, "{}", text);
        let _ = buf.reset();
        String::from_utf8_lossy(&buf.into_inner()).into_owned()
    }
}

pub mod palette {
    use termcolor::{Color, ColorSpec};

    fn fg(colour: Color) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(colour));
        spec
    }

    fn fg_intense(colour: Color) -> ColorSpec {
        let mut spec = fg(colour);
        spec.set_intense(true);
        spec
    }

    fn fg_intense_bold(colour: Color) -> ColorSpec {
        let mut spec = fg_intense(colour);
        spec.set_bold(true);
        spec
    }

    /// Frame prefixes, separator rules, location punctuation.
    pub fn dim() -> ColorSpec {
        fg_intense(Color::Black)
    }

    /// The `by 0x...:` / `at 0x...:` address token.
    pub fn address() -> ColorSpec {
        fg(Color::Yellow)
    }

    /// Function and operator name tokens inside a signature.
    pub fn func_name() -> ColorSpec {
        fg_intense_bold(Color::Cyan)
    }

    /// Trailing cv-qualifier of a member function.
    pub fn qualifier() -> ColorSpec {
        fg_intense(Color::Green)
    }

    /// Bare C symbols.
    pub fn c_symbol() -> ColorSpec {
        fg_intense_bold(Color::Blue)
    }

    /// Symbols no grammar could make sense of: fail loud, not silent.
    pub fn unknown() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bg(Some(Color::Red)).set_fg(Some(Color::Black));
        spec
    }

    /// Source file path in a location suffix.
    pub fn file() -> ColorSpec {
        fg_intense(Color::White)
    }

    /// Line numbers and numeric runs in summaries.
    pub fn number() -> ColorSpec {
        fg(Color::Magenta)
    }

    /// Library paths in `in lib.so` locations (frames without debug info).
    pub fn library() -> ColorSpec {
        fg(Color::Red)
    }

    /// All-caps section headers such as `HEAP SUMMARY:`.
    pub fn header_strong() -> ColorSpec {
        fg_intense(Color::Green)
    }

    /// Sentence-style headers ending in a colon.
    pub fn header() -> ColorSpec {
        fg(Color::Green)
    }

    /// Error lines.
    pub fn error() -> ColorSpec {
        fg_intense_bold(Color::Red)
    }

    /// Indented informational lines.
    pub fn info() -> ColorSpec {
        fg_intense_bold(Color::Blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncoloured_paint_is_identity() {
        let painter = Painter::new(false);
        assert_eq!(painter.paint(&palette::error(), "boom"), "boom");
    }

    #[test]
    fn coloured_paint_brackets_text_with_escapes() {
        let painter = Painter::new(true);
        let out = painter.paint(&palette::address(), "at 0x4005BD: ");
        assert!(out.starts_with('\x1b'));
        assert!(out.ends_with("\x1b[0m"));
        assert!(out.contains("at 0x4005BD: "));
    }

    #[test]
    fn empty_span_paints_to_nothing() {
        let painter = Painter::new(true);
        assert_eq!(painter.paint(&palette::dim(), ""), "");
    }
}
