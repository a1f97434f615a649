//! Classifies the trailing `(...)` suffix of a stack-frame line.
//!
//! Valgrind resolves a frame either to a source position (`test.c:7`) or,
//! when debug info is missing, to the object it came from
//! (`in /usr/lib/libc.so.6`). Anything else is kept opaque and rendered
//! with minimal styling.

use lazy_static::lazy_static;
use regex::Regex;

use crate::style::{palette, Painter};

lazy_static! {
    static ref FILE_LINE: Regex = Regex::new(r"^(?P<file>[^:]+):(?P<line>\d+)$").unwrap();
    static ref IN_LIBRARY: Regex = Regex::new(
        r"^(?P<in>in\s+)(?P<lib>.*\.(?:a|so|dylib|dll)(?:(?:\.[0-9]+)+)?)$"
    )
    .unwrap();
}

/// One recognized location suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    FileLine { file: String, line: u64 },
    InLibrary { library: String },
    Opaque { raw: String },
}

/// Total classification: `file:line`, then `in <library>`, else `Opaque`.
pub fn parse_location(raw: &str) -> Location {
    if let Some(caps) = FILE_LINE.captures(raw) {
        if let Ok(line) = caps["line"].parse::<u64>() {
            return Location::FileLine {
                file: caps["file"].to_string(),
                line,
            };
        }
    }
    if let Some(caps) = IN_LIBRARY.captures(raw) {
        return Location::InLibrary {
            library: caps["lib"].to_string(),
        };
    }
    Location::Opaque {
        raw: raw.to_string(),
    }
}

/// Renders a location suffix (without its surrounding parentheses).
///
/// Styling only brackets slices of the original capture text, so stripping
/// escapes always reconstructs `raw`.
pub fn render(painter: &Painter, raw: &str) -> String {
    if let Some(caps) = FILE_LINE.captures(raw) {
        let mut out = String::with_capacity(raw.len() + 32);
        out.push_str(&painter.paint(&palette::file(), &caps["file"]));
        out.push_str(&painter.paint(&palette::dim(), ":"));
        out.push_str(&painter.paint(&palette::number(), &caps["line"]));
        return out;
    }
    if let Some(caps) = IN_LIBRARY.captures(raw) {
        let mut out = String::with_capacity(raw.len() + 16);
        out.push_str(&caps["in"]);
        out.push_str(&painter.paint(&palette::library(), &caps["lib"]));
        return out;
    }
    raw.to_string()
}
