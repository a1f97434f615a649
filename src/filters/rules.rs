//! The canonical five filters, in registration order.
//!
//! All five anchor on the `==pid==` frame marker; the whitespace run that
//! follows it is the discriminant and is matched exactly: one space for
//! Error and Summary, two for Info, one-or-more for ByAt (stack frames are
//! indented under their error header), any for Blank.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::location;
use crate::signature;
use crate::style::{palette, Painter};

use super::Filter;

lazy_static! {
    static ref BYAT: Regex = Regex::new(
        r"^(?P<prefix>==\d+== +)(?P<byat>(?:by|at) 0x[A-F0-9]+: )(?P<func>.+?)(?: \((?P<loc>[^)]+)\))?$"
    )
    .unwrap();
    static ref SUMMARY: Regex =
        Regex::new(r"^(?P<prefix>==\d+== )(?P<header>.+?:)(?P<text>.*)$").unwrap();
    static ref ERROR: Regex = Regex::new(r"^(?P<prefix>==\d+== )(?P<error>\S.+)$").unwrap();
    static ref INFO: Regex = Regex::new(r"^(?P<prefix>==\d+==  )(?P<info>\S.+)$").unwrap();
    static ref BLANK: Regex = Regex::new(r"^(?P<prefix>==\d+== *)$").unwrap();
    static ref ALL_CAPS_HEADER: Regex = Regex::new(r"^[A-Z ]+:$").unwrap();
    static ref NUMBER_RUN: Regex = Regex::new(r"\b[0-9][0-9,\.]*\b").unwrap();
}

/// The five filters in priority order: ByAt, Summary, Error, Info, Blank.
pub fn canonical_filters() -> [Filter; 5] {
    [
        Filter::new("ByAt", &BYAT, render_byat),
        Filter::new("Summary", &SUMMARY, render_summary),
        Filter::new("Error", &ERROR, render_error),
        Filter::new("Info", &INFO, render_info),
        Filter::new("Blank", &BLANK, render_blank),
    ]
}

fn prefix(painter: &Painter, caps: &Captures) -> String {
    painter.paint(&palette::dim(), &caps["prefix"])
}

/// Stack-frame line: dim prefix, yellow address token, highlighted symbol,
/// and a parsed location suffix inside dimmed parentheses.
fn render_byat(painter: &Painter, caps: &Captures) -> String {
    let mut out = prefix(painter, caps);
    out.push_str(&painter.paint(&palette::address(), &caps["byat"]));
    out.push_str(&signature::highlight(painter, &caps["func"]));
    if let Some(loc) = caps.name("loc") {
        out.push_str(&painter.paint(&palette::dim(), " ("));
        out.push_str(&location::render(painter, loc.as_str()));
        out.push_str(&painter.paint(&palette::dim(), ")"));
    }
    out
}

/// Labeled summary line: all-caps section headers get the stronger hue, and
/// every maximal digit/comma/period run in the free text is picked out.
fn render_summary(painter: &Painter, caps: &Captures) -> String {
    let mut out = prefix(painter, caps);
    let header = &caps["header"];
    let header_spec = if ALL_CAPS_HEADER.is_match(header) {
        palette::header_strong()
    } else {
        palette::header()
    };
    out.push_str(&painter.paint(&header_spec, header));
    let text = NUMBER_RUN.replace_all(&caps["text"], |num: &Captures| {
        painter.paint(&palette::number(), &num[0])
    });
    out.push_str(&text);
    out
}

fn render_error(painter: &Painter, caps: &Captures) -> String {
    let mut out = prefix(painter, caps);
    out.push_str(&painter.paint(&palette::error(), &caps["error"]));
    out
}

fn render_info(painter: &Painter, caps: &Captures) -> String {
    let mut out = prefix(painter, caps);
    out.push_str(&painter.paint(&palette::info(), &caps["info"]));
    out
}

fn render_blank(painter: &Painter, caps: &Captures) -> String {
    prefix(painter, caps)
}
