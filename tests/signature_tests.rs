// Public-API coverage of the symbol highlighter and the location sub-parser.

use regex::Regex;

use vgcolour::location::{parse_location, Location};
use vgcolour::signature::{highlight, parse_signature, ParsedSignature};
use vgcolour::style::Painter;

fn strip_styling(text: &str) -> String {
    let escapes = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    escapes.replace_all(text, "").into_owned()
}

#[test]
fn classification_is_total_and_exclusive() {
    let cases: &[(&str, fn(&ParsedSignature) -> bool)] = &[
        ("int foo(int, char*)", |s| {
            matches!(s, ParsedSignature::PlainFunction { .. })
        }),
        ("std::vector<int>::push_back(int const&)", |s| {
            matches!(s, ParsedSignature::PlainFunction { .. })
        }),
        ("operator<<(std::ostream&, int)", |s| {
            matches!(s, ParsedSignature::OperatorOverload { .. })
        }),
        ("malloc", |s| matches!(s, ParsedSignature::CSymbol { .. })),
        ("???", |s| matches!(s, ParsedSignature::Unknown)),
    ];
    for (raw, check) in cases {
        let parsed = parse_signature(raw);
        assert!(check(&parsed), "wrong variant for {raw:?}: {parsed:?}");
    }
}

#[test]
fn highlighting_preserves_content_for_every_variant() {
    let painter = Painter::new(true);
    for raw in [
        "int foo(int, char*)",
        "std::vector<int>::push_back(int const&)",
        "std::map<std::string, int>::find(std::string const&) const",
        "void fill<int, 16u>(int*)",
        "(anonymous namespace)::helper(int)",
        "bool operator==(Foo const&, Foo const&)",
        "operator delete[](void*)",
        "operator<<(std::ostream&, int)",
        "malloc",
        "start.cold",
        "???",
        "signal handler called",
    ] {
        assert_eq!(strip_styling(&highlight(&painter, raw)), raw);
    }
}

#[test]
fn unknown_symbols_are_flagged_loudly() {
    let painter = Painter::new(true);
    let plain = highlight(&painter, "malloc");
    let unknown = highlight(&painter, "???");
    assert!(unknown.contains('\x1b'));
    // different accents for a recognized C symbol and a parse miss
    assert_ne!(
        unknown.replace("???", "X"),
        plain.replace("malloc", "X")
    );
}

#[test]
fn qualifier_is_styled_separately_from_parameter_types() {
    let painter = Painter::new(true);
    let raw = "std::string::at(unsigned long) const";
    let out = highlight(&painter, raw);
    // the parameter list must stay unstyled even though the trailing
    // qualifier gets its own accent
    assert!(out.contains("(unsigned long)"));
    assert!(out.ends_with("const\x1b[0m"));
}

#[test]
fn location_classification() {
    assert_eq!(
        parse_location("foo.c:42"),
        Location::FileLine {
            file: "foo.c".to_string(),
            line: 42
        }
    );
    assert_eq!(
        parse_location("in libc.so.6"),
        Location::InLibrary {
            library: "libc.so.6".to_string()
        }
    );
    assert_eq!(
        parse_location("somewhere odd"),
        Location::Opaque {
            raw: "somewhere odd".to_string()
        }
    );
}
