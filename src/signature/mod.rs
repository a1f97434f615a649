//! Symbol classification and highlighting for stack-frame function text.
//!
//! Classification is total and tries the precise grammars first:
//!
//! 1. ordinary/templated function signature,
//! 2. operator overload,
//! 3. bare C-style symbol,
//! 4. `Unknown`, rendered on an inverted error background so a parse miss
//!    is flagged to the reader instead of silently passing as plain text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::style::{palette, Painter};

pub mod grammar;

pub use grammar::Span;

lazy_static! {
    /// Bare identifier, dots allowed (`malloc`, `gsignal`, `start.cold`).
    static ref C_SYMBOL: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
}

/// Decomposition of one raw symbol string. All spans are byte offsets into
/// the input; `pre` and `post` bracket the matched grammar prefix around the
/// name token, with any decoration past the prefix outside `post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSignature {
    PlainFunction {
        pre: Span,
        name: Span,
        post: Span,
        qualifier: Option<Span>,
    },
    OperatorOverload {
        pre: Span,
        op: Span,
        post: Span,
    },
    CSymbol {
        name: Span,
    },
    Unknown,
}

/// Classifies `raw` into exactly one [`ParsedSignature`] variant.
pub fn parse_signature(raw: &str) -> ParsedSignature {
    if let Some(m) = grammar::match_function(raw) {
        return ParsedSignature::PlainFunction {
            pre: Span {
                start: 0,
                end: m.name.start,
            },
            name: m.name,
            post: Span {
                start: m.name.end,
                end: m.end,
            },
            qualifier: m.qualifier,
        };
    }
    if let Some(m) = grammar::match_operator(raw) {
        return ParsedSignature::OperatorOverload {
            pre: Span {
                start: 0,
                end: m.op.start,
            },
            op: m.op,
            post: Span {
                start: m.op.end,
                end: m.end,
            },
        };
    }
    if C_SYMBOL.is_match(raw) {
        return ParsedSignature::CSymbol {
            name: Span {
                start: 0,
                end: raw.len(),
            },
        };
    }
    ParsedSignature::Unknown
}

/// Renders `raw` with its name/operator/qualifier tokens highlighted.
/// Only escape sequences are inserted; stripping them reproduces `raw`.
pub fn highlight(painter: &Painter, raw: &str) -> String {
    match parse_signature(raw) {
        ParsedSignature::PlainFunction {
            name, qualifier, ..
        } => {
            let mut out = String::with_capacity(raw.len() + 32);
            out.push_str(&raw[..name.start]);
            out.push_str(&painter.paint(&palette::func_name(), name.of(raw)));
            match qualifier {
                Some(qual) => {
                    out.push_str(&raw[name.end..qual.start]);
                    out.push_str(&painter.paint(&palette::qualifier(), qual.of(raw)));
                    out.push_str(&raw[qual.end..]);
                }
                None => out.push_str(&raw[name.end..]),
            }
            out
        }
        ParsedSignature::OperatorOverload { op, .. } => {
            let mut out = String::with_capacity(raw.len() + 16);
            out.push_str(&raw[..op.start]);
            out.push_str(&painter.paint(&palette::func_name(), op.of(raw)));
            out.push_str(&raw[op.end..]);
            out
        }
        ParsedSignature::CSymbol { .. } => painter.paint(&palette::c_symbol(), raw),
        ParsedSignature::Unknown => painter.paint(&palette::unknown(), raw),
    }
}
