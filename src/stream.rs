//! Stream classification: program output vs. valgrind output.
//!
//! The classifier owns the only mutable state in the pipeline. It shifts the
//! mode of each incoming line, inserts a dim full-width rule whenever the
//! source of the stream changes, passes program lines through untouched, and
//! hands valgrind lines to the filter chain. `previous` starts out empty so
//! no separator is ever emitted before the first line of a run.

use lazy_static::lazy_static;
use regex::Regex;

use crate::filters::FilterChain;
use crate::style::{palette, Painter};

lazy_static! {
    static ref DEBUGGER_PREFIX: Regex = Regex::new(r"^==\d+==").unwrap();
}

/// Who produced a line: the instrumented program, or valgrind itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ProgramOutput,
    DebuggerOutput,
}

/// One classified line, plus the separator that precedes it at a mode
/// transition. Content is atomic: `line` is either fully styled or the
/// input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub separator: Option<String>,
    pub line: String,
}

/// Source of the terminal column count used to size separator rules. The
/// width is re-queried at every transition, since the terminal may be
/// resized mid-run.
pub trait WidthSource {
    fn columns(&self) -> usize;
}

/// Live terminal width via crossterm, falling back to 80 columns when the
/// query fails (e.g. output redirected to a file).
pub struct TerminalWidth;

impl WidthSource for TerminalWidth {
    fn columns(&self) -> usize {
        crossterm::terminal::size()
            .map(|(cols, _rows)| cols as usize)
            .unwrap_or(80)
    }
}

/// Fixed width, for tests and non-terminal sinks.
pub struct FixedWidth(pub usize);

impl WidthSource for FixedWidth {
    fn columns(&self) -> usize {
        self.0
    }
}

pub struct StreamClassifier<W: WidthSource> {
    painter: Painter,
    chain: FilterChain,
    width: W,
    previous: Option<Mode>,
    current: Option<Mode>,
}

impl<W: WidthSource> StreamClassifier<W> {
    pub fn new(painter: Painter, width: W) -> Self {
        Self {
            painter,
            chain: FilterChain::new(painter),
            width,
            previous: None,
            current: None,
        }
    }

    /// Mode of the most recently classified line.
    pub fn mode(&self) -> Option<Mode> {
        self.current
    }

    /// Classifies one line. Never fails: a valgrind line no filter matches
    /// passes through the chain unmodified.
    pub fn classify(&mut self, line: &str) -> Rendered {
        let mode = if DEBUGGER_PREFIX.is_match(line) {
            Mode::DebuggerOutput
        } else {
            Mode::ProgramOutput
        };
        self.previous = self.current;
        self.current = Some(mode);

        let separator = match self.previous {
            Some(prev) if prev != mode => Some(self.separator()),
            _ => None,
        };

        let line = match mode {
            Mode::ProgramOutput => line.to_string(),
            Mode::DebuggerOutput => self.chain.dispatch(line),
        };

        Rendered { separator, line }
    }

    fn separator(&self) -> String {
        let rule = "=".repeat(self.width.columns());
        self.painter.paint(&palette::dim(), &rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> StreamClassifier<FixedWidth> {
        StreamClassifier::new(Painter::new(false), FixedWidth(10))
    }

    #[test]
    fn program_lines_pass_through_unchanged() {
        let mut c = classifier();
        let out = c.classify("hello from the program");
        assert_eq!(out.line, "hello from the program");
        assert_eq!(out.separator, None);
        assert_eq!(c.mode(), Some(Mode::ProgramOutput));
    }

    #[test]
    fn no_separator_before_first_line_either_mode() {
        let mut c = classifier();
        assert_eq!(c.classify("==1== Invalid free()").separator, None);

        let mut c = classifier();
        assert_eq!(c.classify("program says hi").separator, None);
    }

    #[test]
    fn separator_exactly_at_transitions() {
        let mut c = classifier();
        assert_eq!(c.classify("==1== Invalid read of size 4").separator, None);
        assert_eq!(c.classify("==1==    at 0x1: main (a.c:1)").separator, None);
        let to_program = c.classify("program output");
        assert_eq!(to_program.separator.as_deref(), Some("=========="));
        assert_eq!(c.classify("more program output").separator, None);
        let back = c.classify("==1== HEAP SUMMARY:");
        assert!(back.separator.is_some());
    }

    #[test]
    fn separator_width_tracks_the_source() {
        let mut c = StreamClassifier::new(Painter::new(false), FixedWidth(3));
        c.classify("program");
        assert_eq!(c.classify("==1== ").separator.as_deref(), Some("==="));
    }
}
