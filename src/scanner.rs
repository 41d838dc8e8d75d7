//! Comment-vs-literal scanner.
//!
//! Input text is split into contiguous [`Span`]s that cover every byte
//! exactly once. String literals are recognised before comment openers, so
//! `"a // b"` stays one literal and is copied through untouched.
//!
//! All delimiters are ASCII, so span boundaries always fall on UTF-8 char
//! boundaries and the scan can work on bytes.

use memchr::{memchr, memchr2, memchr3, memmem};

use crate::layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    LineComment,
    BlockComment,
    StringLiteral,
    Plain,
}

impl SpanKind {
    pub const fn is_comment(self) -> bool {
        matches!(self, SpanKind::LineComment | SpanKind::BlockComment)
    }
}

/// Half-open byte range `[start, end)` over the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl Span {
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// Which constructs a dialect family recognises besides `/* */`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub line_comments: bool,
    pub string_literals: bool,
}

impl Rules {
    /// `//` and `/* */` comments, `'...'` and `"..."` literals with backslash escapes.
    pub const SCRIPT: Rules = Rules {
        line_comments: true,
        string_literals: true,
    };

    /// `/* */` comments only.
    pub const STYLESHEET: Rules = Rules {
        line_comments: false,
        string_literals: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    InLineComment,
    InBlockComment,
    InSingleQuoteString,
    InDoubleQuoteString,
}

impl State {
    const fn kind(self) -> SpanKind {
        match self {
            State::Default => SpanKind::Plain,
            State::InLineComment => SpanKind::LineComment,
            State::InBlockComment => SpanKind::BlockComment,
            State::InSingleQuoteString | State::InDoubleQuoteString => SpanKind::StringLiteral,
        }
    }
}

/// Forward scanner yielding one [`Span`] per call.
///
/// Each span starts in the state selected by the byte at the current
/// position (plus one byte of lookahead for `//` and `/*`) and runs until
/// that state ends. Consecutive plain bytes are merged into a single span.
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    rules: Rules,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, rules: Rules) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
            rules,
        }
    }

    /// State entered by the construct opening at `at`.
    fn classify(&self, at: usize) -> State {
        match self.src[at] {
            b'\'' if self.rules.string_literals => State::InSingleQuoteString,
            b'"' if self.rules.string_literals => State::InDoubleQuoteString,
            b'/' => match self.src.get(at + 1) {
                Some(b'/') if self.rules.line_comments => State::InLineComment,
                Some(b'*') => State::InBlockComment,
                _ => State::Default,
            },
            _ => State::Default,
        }
    }

    fn next_candidate(&self, from: usize) -> Option<usize> {
        let hay = &self.src[from..];
        let found = if self.rules.string_literals {
            memchr3(b'/', b'\'', b'"', hay)
        } else {
            memchr(b'/', hay)
        };
        found.map(|i| from + i)
    }

    fn end_of(&self, state: State) -> usize {
        let len = self.src.len();
        let start = self.pos;
        match state {
            State::Default => {
                let mut at = start + 1;
                while let Some(cand) = self.next_candidate(at) {
                    if self.classify(cand) != State::Default {
                        return cand;
                    }
                    at = cand + 1;
                }
                len
            }
            // The newline itself stays plain.
            State::InLineComment => {
                memchr(b'\n', &self.src[start + 2..]).map_or(len, |i| start + 2 + i)
            }
            State::InBlockComment => memmem::find(&self.src[start + 2..], b"*/")
                .map_or(len, |i| start + 2 + i + 2),
            State::InSingleQuoteString => self.end_of_literal(b'\''),
            State::InDoubleQuoteString => self.end_of_literal(b'"'),
        }
    }

    fn end_of_literal(&self, quote: u8) -> usize {
        let len = self.src.len();
        let mut at = self.pos + 1;
        while let Some(i) = memchr2(quote, b'\\', &self.src[at..]) {
            let hit = at + i;
            if self.src[hit] == quote {
                return hit + 1;
            }
            // Skip the escaped byte, whatever it is.
            at = (hit + 2).min(len);
        }
        len
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.pos >= self.src.len() {
            return None;
        }
        let state = self.classify(self.pos);
        let span = Span {
            start: self.pos,
            end: self.end_of(state),
            kind: state.kind(),
        };
        self.pos = span.end;
        Some(span)
    }
}

/// Classifies the whole of `text` under `rules`.
pub fn spans(text: &str, rules: Rules) -> Vec<Span> {
    Scanner::new(text, rules).collect()
}

/// Copies `text` with every comment span replaced by `replacement`.
pub fn replace_comments(text: &str, rules: Rules, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for span in Scanner::new(text, rules) {
        if span.kind.is_comment() {
            out.push_str(replacement);
        } else {
            out.push_str(span.text(text));
        }
    }
    out
}

/// Strips `//` and `/* */` comments from script source.
///
/// Each comment becomes a single space so `a/**/b` cannot fuse into `ab`.
/// Lines are right-trimmed, runs of blank lines collapse to one and
/// trailing blank lines are removed.
pub fn clean_script(text: &str) -> String {
    layout::collapse_blank_runs(&replace_comments(text, Rules::SCRIPT, " "))
}

/// Strips `/* */` comments from style-sheet source and drops every line
/// left blank.
pub fn clean_stylesheet(text: &str) -> String {
    layout::drop_blank_lines(&replace_comments(text, Rules::STYLESHEET, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exhaustive(text: &str, spans: &[Span]) {
        let mut at = 0;
        for span in spans {
            assert_eq!(span.start, at, "gap or overlap before {span:?}");
            assert!(!span.is_empty());
            at = span.end;
        }
        assert_eq!(at, text.len());
    }

    #[test]
    fn spans_cover_input_without_gaps() {
        let text = "let s = 'it\\'s'; // note\nlet t = \"/* no */\"; /* yes */ x / y\n";
        let spans = spans(text, Rules::SCRIPT);
        assert_exhaustive(text, &spans);
        let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpanKind::Plain,
                SpanKind::StringLiteral,
                SpanKind::Plain,
                SpanKind::LineComment,
                SpanKind::Plain,
                SpanKind::StringLiteral,
                SpanKind::Plain,
                SpanKind::BlockComment,
                SpanKind::Plain,
            ]
        );
        assert_eq!(spans[1].text(text), "'it\\'s'");
        assert_eq!(spans[3].text(text), "// note");
        assert_eq!(spans[7].text(text), "/* yes */");
    }

    #[test]
    fn spans_handle_multibyte_text() {
        let text = "const s = \"привет // мир\"; // комментарий\n/* ✓ */ ok";
        let spans = spans(text, Rules::SCRIPT);
        assert_exhaustive(text, &spans);
        assert_eq!(spans[1].text(text), "\"привет // мир\"");
        assert_eq!(spans[3].text(text), "// комментарий");
    }

    #[test]
    fn string_literal_shields_comment_openers() {
        let text = "x = \"a // not a comment\"\n";
        assert_eq!(clean_script(text), text);
        let text = "y = '/* nope */';\n";
        assert_eq!(clean_script(text), text);
    }

    #[test]
    fn escaped_quote_does_not_close_literal() {
        let text = "s = \"he said \\\"// hi\\\"\" // tail\n";
        assert_eq!(clean_script(text), "s = \"he said \\\"// hi\\\"\"\n");
    }

    #[test]
    fn quotes_of_other_kind_do_not_close_literal() {
        let text = "a = \"it's // fine\"; b = 'say \"/*\"';\n";
        assert_eq!(clean_script(text), text);
    }

    #[test]
    fn block_comment_becomes_space() {
        assert_eq!(clean_script("a/*c*/b"), "a b\n");
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let text = "let x = 1; // set x\nlet y = 2;";
        assert_eq!(clean_script(text), "let x = 1;\nlet y = 2;\n");
    }

    #[test]
    fn crlf_line_comment_is_trimmed() {
        assert_eq!(clean_script("a // c\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        let text = "let a = 1;\nlet b = 2; /* never closed\nstill comment";
        assert_eq!(clean_script(text), "let a = 1;\nlet b = 2;\n");
    }

    #[test]
    fn unterminated_literal_runs_to_end() {
        let text = "x = 'abc // still string\n/* also string */";
        let spans = spans(text, Rules::SCRIPT);
        assert_eq!(spans.last().map(|s| s.kind), Some(SpanKind::StringLiteral));
        assert_eq!(clean_script(text), format!("{text}\n"));
    }

    #[test]
    fn trailing_backslash_in_literal() {
        let text = "s = \"abc\\";
        assert_exhaustive(text, &spans(text, Rules::SCRIPT));
        assert_eq!(clean_script(text), "s = \"abc\\\n");
    }

    #[test]
    fn slash_alone_is_plain() {
        let text = "const half = total / 2;\nconst ratio = a/b;\n";
        assert_eq!(clean_script(text), text);
    }

    #[test]
    fn block_opener_needs_its_own_closer() {
        // `/*/` does not close itself.
        assert_eq!(clean_script("a /*/ b */ c"), "a   c\n");
    }

    #[test]
    fn script_is_idempotent() {
        let samples = [
            "a/*c*/b",
            "x = \"a // b\"; // c\n\n\n// d\ny = 'q';\n",
            "/* start\n\nend */\nfoo();\n\n\n\nbar(); // end\n\n",
            "s = 'unterminated // here\n\n\n",
            "\n\n  lead();\n",
        ];
        for s in samples {
            let once = clean_script(s);
            assert_eq!(clean_script(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn script_without_comments_is_unchanged() {
        let text = "const a = 1;\n\nfunction f() {\n  return 'x';\n}\n";
        assert_eq!(clean_script(text), text);
    }

    #[test]
    fn comment_only_input_is_empty() {
        assert_eq!(clean_script("// only\n/* and */\n"), "");
        assert_eq!(clean_script(""), "");
        assert_eq!(clean_stylesheet("/* only */\n"), "");
    }

    #[test]
    fn stylesheet_drops_comment_only_lines() {
        let text = "a { color: red; }\n/* comment */\nb { color: blue; }\n";
        assert_eq!(clean_stylesheet(text), "a { color: red; }\nb { color: blue; }\n");
    }

    #[test]
    fn stylesheet_removes_comment_without_space() {
        assert_eq!(clean_stylesheet("a{color:red/* x */;}"), "a{color:red;}\n");
    }

    #[test]
    fn stylesheet_comments_do_not_nest() {
        let text = "/* outer /* inner */ tail */ x";
        assert_eq!(clean_stylesheet(text), " tail */ x\n");
    }

    #[test]
    fn stylesheet_has_no_line_comments_or_literals() {
        let spans = spans("a { b: url(//cdn); c: \"/* x */\"; }", Rules::STYLESHEET);
        let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SpanKind::Plain, SpanKind::BlockComment, SpanKind::Plain]
        );
    }

    #[test]
    fn stylesheet_unterminated_comment_discards_rest() {
        let text = "a { x: 1; }\n/* open\nb { y: 2; }\n";
        assert_eq!(clean_stylesheet(text), "a { x: 1; }\n");
    }
}
