//! Recursive-descent grammar for a practical subset of demangled C++
//! declarator syntax.
//!
//! The two entry points, [`match_function`] and [`match_operator`], anchor at
//! the start of the input and consume a prefix (decorations after the
//! signature are tolerated and left to the caller). On success they report
//! byte spans for the tokens the highlighter styles independently: the
//! function or operator name, and the trailing cv-qualifier when present.
//!
//! The rule set is deliberately not a full C++ type grammar: function
//! pointers, pack expansions and the like are out, and a miss simply means
//! the symbol is classified differently upstream. Each rule restores the
//! cursor on failure, so alternatives compose by ordered choice with the
//! longest keyword forms tried first (`long long int` before `long`).

/// Half-open byte range into the raw signature text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn of<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Successful match of the ordinary function-signature form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMatch {
    /// The function name token.
    pub name: Span,
    /// Trailing cv-qualifier after the parameter list, leading whitespace
    /// included.
    pub qualifier: Option<Span>,
    /// End of the matched prefix.
    pub end: usize,
}

/// Successful match of the operator-overload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorMatch {
    /// The operator-name token following the `operator` keyword.
    pub op: Span,
    /// End of the matched prefix.
    pub end: usize,
}

/// Matches `[return-type] [namespace::]name[<args>](params) [cv]`.
pub fn match_function(text: &str) -> Option<FunctionMatch> {
    let mut cur = Cursor::new(text);
    if cur.type_() && cur.eat_one_ws() {
        cur.skip_ws();
        if let Some(m) = function_tail(&mut cur) {
            return Some(m);
        }
    }
    let mut cur = Cursor::new(text);
    cur.skip_ws();
    function_tail(&mut cur)
}

/// Matches `[return-type] [namespace::]operator<op>[<args>][(params)]`.
pub fn match_operator(text: &str) -> Option<OperatorMatch> {
    let mut cur = Cursor::new(text);
    if cur.type_() && cur.eat_one_ws() {
        cur.skip_ws();
        if let Some(m) = operator_tail(&mut cur) {
            return Some(m);
        }
    }
    let mut cur = Cursor::new(text);
    cur.skip_ws();
    operator_tail(&mut cur)
}

fn function_tail(cur: &mut Cursor) -> Option<FunctionMatch> {
    let save = cur.pos;
    if cur.namespace() {
        if let Some(m) = function_name_and_post(cur) {
            return Some(m);
        }
        cur.pos = save;
    }
    function_name_and_post(cur)
}

fn function_name_and_post(cur: &mut Cursor) -> Option<FunctionMatch> {
    let save = cur.pos;
    let name_start = cur.pos;
    if !cur.ident() {
        return None;
    }
    let name = Span {
        start: name_start,
        end: cur.pos,
    };
    cur.skip_ws();
    cur.template();
    cur.skip_ws();
    if !cur.param_list() {
        cur.pos = save;
        return None;
    }
    let qual_save = cur.pos;
    let mut qualifier = None;
    if cur.ws1() && cur.cv_qualifier() {
        qualifier = Some(Span {
            start: qual_save,
            end: cur.pos,
        });
    } else {
        cur.pos = qual_save;
    }
    Some(FunctionMatch {
        name,
        qualifier,
        end: cur.pos,
    })
}

fn operator_tail(cur: &mut Cursor) -> Option<OperatorMatch> {
    let save = cur.pos;
    if cur.namespace() {
        if let Some(m) = operator_name_and_post(cur) {
            return Some(m);
        }
        cur.pos = save;
    }
    operator_name_and_post(cur)
}

fn operator_name_and_post(cur: &mut Cursor) -> Option<OperatorMatch> {
    let save = cur.pos;
    if !cur.eat_str("operator") {
        return None;
    }
    let op = match operator_name(cur) {
        Some(span) => span,
        None => {
            cur.pos = save;
            return None;
        }
    };
    cur.skip_ws();
    cur.template();
    let param_save = cur.pos;
    if !cur.param_list() {
        cur.pos = param_save;
    }
    Some(OperatorMatch { op, end: cur.pos })
}

/// One of: a run of symbol characters (`<<`, `()`, `[]`, ...), `new` or
/// `delete` with an optional `[]`, or a conversion-operator target type.
fn operator_name(cur: &mut Cursor) -> Option<Span> {
    let start = cur.pos;
    let text = cur.text;

    // Symbol run, shrunk from the right until the next character is
    // whitespace, an opening paren, or end of input. Shrinking is what keeps
    // the parameter list's own paren out of the token: `operator<<(` must
    // yield `<<`, not `<<(`.
    let mut end = start;
    for (i, ch) in text[start..].char_indices() {
        if is_word(ch) {
            break;
        }
        end = start + i + ch.len_utf8();
    }
    let mut e = end;
    while e > start {
        match text[e..].chars().next() {
            None => break,
            Some(c) if c.is_whitespace() || c == '(' => break,
            Some(_) => match text[..e].chars().next_back() {
                Some(prev) => e -= prev.len_utf8(),
                None => break,
            },
        }
    }
    if e > start {
        cur.pos = e;
        return Some(Span { start, end: e });
    }

    // `operator new`, `operator delete[]`
    if cur.ws1() && (cur.eat_keyword("new") || cur.eat_keyword("delete")) {
        cur.skip_ws();
        cur.eat_str("[]");
        return Some(Span {
            start,
            end: cur.pos,
        });
    }
    cur.pos = start;

    // conversion operator: `operator bool`, `operator std::string`
    if cur.ws1() && cur.type_() {
        return Some(Span {
            start,
            end: cur.pos,
        });
    }
    cur.pos = start;
    None
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_word(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes `kw` only when not glued to a following identifier character,
    /// so `long` never matches the head of `long_name`.
    fn eat_keyword(&mut self, kw: &str) -> bool {
        let save = self.pos;
        if self.eat_str(kw) {
            if !self.peek().map_or(false, is_word) {
                return true;
            }
            self.pos = save;
        }
        false
    }

    fn eat_one_ws(&mut self) -> bool {
        match self.peek() {
            Some(c) if c.is_whitespace() => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// One or more whitespace characters.
    fn ws1(&mut self) -> bool {
        if !self.eat_one_ws() {
            return false;
        }
        self.skip_ws();
        true
    }

    fn skip_ws(&mut self) {
        while self.eat_one_ws() {}
    }

    fn ident(&mut self) -> bool {
        if !self.peek().map_or(false, is_ident_start) {
            return false;
        }
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !is_word(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        true
    }

    fn cv_qualifier(&mut self) -> bool {
        self.eat_keyword("const") || self.eat_keyword("volatile")
    }

    fn sign(&mut self) -> bool {
        self.eat_keyword("signed") || self.eat_keyword("unsigned")
    }

    fn ref_ptr(&mut self) -> bool {
        self.eat_str("**") || self.eat_str("*") || self.eat_str("&&") || self.eat_str("&")
    }

    /// `[::] (segment::)+` where a segment is an identifier with an optional
    /// template argument list, or the anonymous-namespace marker.
    fn namespace(&mut self) -> bool {
        let save = self.pos;
        self.eat_str("::");
        let mut matched = false;
        loop {
            let seg = self.pos;
            let ok = if self.anon_namespace() {
                true
            } else if self.ident() {
                self.template();
                true
            } else {
                false
            };
            if !ok || !self.eat_str("::") {
                self.pos = seg;
                break;
            }
            matched = true;
        }
        if !matched {
            self.pos = save;
        }
        matched
    }

    fn anon_namespace(&mut self) -> bool {
        let save = self.pos;
        if self.eat_str("(anonymous") && self.eat_one_ws() && self.eat_str("namespace)") {
            return true;
        }
        self.pos = save;
        false
    }

    /// `< [arg, arg, ...] >`
    fn template(&mut self) -> bool {
        let save = self.pos;
        if !self.eat_char('<') {
            return false;
        }
        self.skip_ws();
        self.template_arglist();
        self.skip_ws();
        if !self.eat_char('>') {
            self.pos = save;
            return false;
        }
        true
    }

    fn template_arglist(&mut self) -> bool {
        if !self.template_arg() {
            return false;
        }
        loop {
            let save = self.pos;
            self.skip_ws();
            if !self.eat_char(',') {
                self.pos = save;
                break;
            }
            self.skip_ws();
            if !self.template_arg() {
                self.pos = save;
                break;
            }
        }
        true
    }

    /// A type, or an optionally-cast numeric literal.
    fn template_arg(&mut self) -> bool {
        if self.type_() {
            return true;
        }
        let save = self.pos;
        self.cast();
        if self.numeric_literal() {
            return true;
        }
        self.pos = save;
        false
    }

    fn cast(&mut self) -> bool {
        let save = self.pos;
        if self.eat_char('(') && self.type_() && self.eat_char(')') {
            return true;
        }
        self.pos = save;
        false
    }

    /// Decimal, octal, hex, or binary literal with an optional u/l suffix.
    /// Hex and binary are tried before octal so `0x1A` isn't cut at the `0`.
    fn numeric_literal(&mut self) -> bool {
        let bytes = self.rest().as_bytes();
        let mut i = 0;
        match bytes.first().copied() {
            Some(b'1'..=b'9') => {
                i = 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            Some(b'0') => {
                if bytes.len() > 2 && (bytes[1] == b'x' || bytes[1] == b'X') {
                    let mut j = 2;
                    while j < bytes.len() && bytes[j].is_ascii_hexdigit() {
                        j += 1;
                    }
                    if j > 2 {
                        i = j;
                    }
                }
                if i == 0 && bytes.len() > 2 && (bytes[1] == b'b' || bytes[1] == b'B') {
                    let mut j = 2;
                    while j < bytes.len() && (bytes[j] == b'0' || bytes[j] == b'1') {
                        j += 1;
                    }
                    if j > 2 {
                        i = j;
                    }
                }
                if i == 0 {
                    i = 1;
                    while i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
                        i += 1;
                    }
                }
            }
            _ => return false,
        }
        let mut suffixes = 0;
        while suffixes < 2 && i < bytes.len() {
            match bytes[i] {
                b'u' | b'U' => {
                    i += 1;
                    suffixes += 1;
                }
                b'l' | b'L' => {
                    i += 1;
                    if i < bytes.len() && (bytes[i] == b'l' || bytes[i] == b'L') {
                        i += 1;
                    }
                    suffixes += 1;
                }
                _ => break,
            }
        }
        self.pos += i;
        true
    }

    fn fundamental_type(&mut self) -> bool {
        let save = self.pos;
        if self.sign() {
            if self.ws1() && (self.eat_keyword("char") || self.integral_core()) {
                return true;
            }
            self.pos = save;
            return false;
        }
        if self.eat_keyword("void")
            || self.eat_keyword("bool")
            || self.eat_keyword("nullptr_t")
            || self.eat_keyword("wchar_t")
            || self.sized_char()
            || self.eat_keyword("char")
            || self.eat_keyword("float")
            || self.eat_keyword("double")
            || self.long_family()
            || self.short_family()
            || self.eat_keyword("int")
        {
            return true;
        }
        self.pos = save;
        false
    }

    /// `char16_t`, `char32_t`
    fn sized_char(&mut self) -> bool {
        let save = self.pos;
        if self.eat_str("char") {
            let bytes = self.rest().as_bytes();
            if bytes.len() >= 4
                && bytes[0].is_ascii_digit()
                && bytes[1].is_ascii_digit()
                && bytes[2] == b'_'
                && bytes[3] == b't'
            {
                self.pos += 4;
                if !self.peek().map_or(false, is_word) {
                    return true;
                }
            }
        }
        self.pos = save;
        false
    }

    /// Integer forms valid after `signed`/`unsigned`.
    fn integral_core(&mut self) -> bool {
        self.eat_keyword("int") || self.short_family() || self.long_int_family()
    }

    fn short_family(&mut self) -> bool {
        if !self.eat_keyword("short") {
            return false;
        }
        self.opt_ws_int();
        true
    }

    /// `long long [int]` | `long [int]`
    fn long_int_family(&mut self) -> bool {
        if !self.eat_keyword("long") {
            return false;
        }
        let save = self.pos;
        if self.ws1() && self.eat_keyword("long") {
            self.opt_ws_int();
            return true;
        }
        self.pos = save;
        self.opt_ws_int();
        true
    }

    /// `long double` | `long long [int]` | `long [int]`
    fn long_family(&mut self) -> bool {
        if !self.eat_keyword("long") {
            return false;
        }
        let save = self.pos;
        if self.ws1() {
            if self.eat_keyword("double") {
                return true;
            }
            if self.eat_keyword("long") {
                self.opt_ws_int();
                return true;
            }
            if self.eat_keyword("int") {
                return true;
            }
        }
        self.pos = save;
        true
    }

    fn opt_ws_int(&mut self) {
        let save = self.pos;
        if !(self.ws1() && self.eat_keyword("int")) {
            self.pos = save;
        }
    }

    /// `[typename] [namespace::]Name[<args>][::dependent...]`
    fn class_type(&mut self) -> bool {
        let save = self.pos;
        if self.eat_keyword("typename") {
            self.skip_ws();
        }
        self.namespace();
        if !self.ident() {
            self.pos = save;
            return false;
        }
        self.template();
        self.dependent();
        true
    }

    /// `(::identifier)+`
    fn dependent(&mut self) -> bool {
        let mut matched = false;
        loop {
            let save = self.pos;
            if self.eat_str("::") && self.ident() {
                matched = true;
            } else {
                self.pos = save;
                break;
            }
        }
        matched
    }

    fn qualified_type(&mut self) -> bool {
        if !(self.fundamental_type() || self.class_type()) {
            return false;
        }
        let save = self.pos;
        if !(self.ws1() && self.cv_qualifier()) {
            self.pos = save;
        }
        true
    }

    fn type_(&mut self) -> bool {
        if !self.qualified_type() {
            return false;
        }
        let save = self.pos;
        self.skip_ws();
        if !self.ref_ptr() {
            self.pos = save;
        }
        true
    }

    /// `( [type {, type}] [, ...] )`
    fn param_list(&mut self) -> bool {
        let save = self.pos;
        if !self.eat_char('(') {
            return false;
        }
        self.skip_ws();
        if self.type_() {
            loop {
                let item = self.pos;
                self.skip_ws();
                if !self.eat_char(',') {
                    self.pos = item;
                    break;
                }
                self.skip_ws();
                if self.eat_str("...") {
                    break;
                }
                if !self.type_() {
                    self.pos = item;
                    break;
                }
            }
        }
        self.skip_ws();
        if !self.eat_char(')') {
            self.pos = save;
            return false;
        }
        true
    }
}
