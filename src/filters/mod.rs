//! Ordered line-shape recognizers for valgrind-output lines.
//!
//! A [`Filter`] pairs one anchored pattern with a render operation over its
//! named captures. The [`FilterChain`] evaluates filters strictly in
//! registration order and applies the first structural match; a line no
//! filter recognizes passes through unmodified. Registration order is the
//! priority contract: the Error pattern is a strict superset of ByAt's and
//! Summary's, and the Info/Error discrimination rests entirely on the
//! length of the whitespace run after the `==pid==` marker, so reordering
//! the chain changes behaviour.

use regex::{Captures, Regex};

use crate::style::Painter;

mod rules;

/// One recognized line shape: a pattern plus its renderer.
pub struct Filter {
    name: &'static str,
    pattern: &'static Regex,
    render: fn(&Painter, &Captures) -> String,
}

impl Filter {
    pub fn new(
        name: &'static str,
        pattern: &'static Regex,
        render: fn(&Painter, &Captures) -> String,
    ) -> Self {
        Self {
            name,
            pattern,
            render,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies this filter's renderer if the line matches its pattern.
    pub fn apply(&self, painter: &Painter, line: &str) -> Option<String> {
        self.pattern
            .captures(line)
            .map(|caps| (self.render)(painter, &caps))
    }
}

/// The ordered filter sequence. Insertion order is priority order; filters
/// with structurally equal patterns are all kept.
pub struct FilterChain {
    painter: Painter,
    filters: Vec<Filter>,
}

impl FilterChain {
    /// Builds the canonical five-filter chain: ByAt, Summary, Error, Info,
    /// Blank.
    pub fn new(painter: Painter) -> Self {
        let mut chain = Self {
            painter,
            filters: Vec::new(),
        };
        for filter in rules::canonical_filters() {
            chain.register(filter);
        }
        chain
    }

    /// Appends a filter at the lowest priority position.
    pub fn register(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Renders `line` with the first matching filter, or returns it
    /// unmodified. Absence of a match is a normal outcome, not an error.
    pub fn dispatch(&self, line: &str) -> String {
        for filter in &self.filters {
            if let Some(rendered) = filter.apply(&self.painter, line) {
                return rendered;
            }
        }
        line.to_string()
    }

    /// Name of the filter that would render `line`, if any. Test seam for
    /// the ordering contract.
    pub fn matching_filter(&self, line: &str) -> Option<&'static str> {
        self.filters
            .iter()
            .find(|f| f.pattern.is_match(line))
            .map(|f| f.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> FilterChain {
        FilterChain::new(Painter::new(false))
    }

    #[test]
    fn canonical_chain_order() {
        let chain = chain();
        assert_eq!(chain.len(), 5);
        assert!(!chain.is_empty());
    }

    #[test]
    fn whitespace_run_discriminates_filters() {
        let chain = chain();
        // one interior space: Error
        assert_eq!(
            chain.matching_filter("==123== Conditional jump depends on uninitialised value(s)"),
            Some("Error")
        );
        // two interior spaces: Info (Error's \S requirement rejects it)
        assert_eq!(
            chain.matching_filter("==123==  Access not within mapped region"),
            Some("Info")
        );
        // three interior spaces: only ByAt's flexible prefix could take it,
        // and this line has no address token, so nothing matches
        assert_eq!(
            chain.matching_filter("==123==   not an address line"),
            None
        );
    }

    #[test]
    fn byat_wins_over_error() {
        let chain = chain();
        assert_eq!(
            chain.matching_filter("==123==    at 0x4005BD: main (test.c:7)"),
            Some("ByAt")
        );
        assert_eq!(
            chain.matching_filter("==123== by 0xDEADBEEF: helper (foo.c:1)"),
            Some("ByAt")
        );
    }

    #[test]
    fn summary_wins_over_error_when_header_present() {
        let chain = chain();
        assert_eq!(
            chain.matching_filter("==123== ERROR SUMMARY: 2 errors from 2 contexts"),
            Some("Summary")
        );
        assert_eq!(
            chain.matching_filter("==123== Invalid read of size 4"),
            Some("Error")
        );
    }

    #[test]
    fn blank_lines_match_blank() {
        let chain = chain();
        assert_eq!(chain.matching_filter("==123== "), Some("Blank"));
        assert_eq!(chain.matching_filter("==123=="), Some("Blank"));
    }

    #[test]
    fn unmatched_lines_pass_through() {
        let chain = chain();
        let line = "==123==   three spaces, no address";
        assert_eq!(chain.dispatch(line), line);
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let mut chain = chain();
        let before = chain.len();
        for filter in super::rules::canonical_filters() {
            chain.register(filter);
        }
        assert_eq!(chain.len(), before * 2);
    }
}
