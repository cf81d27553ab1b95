//! Source text to token stream.
//!
//! Tokenization is an ordered list of rules tried left to right at the
//! current cursor position; the first rule that matches wins. This is
//! deliberately hand-rolled rather than built on a longest-match lexer
//! generator: several rules here are only valid in the absence of a
//! following identifier character (`not`, `and`, `or`, `in`), and `not in`
//! must bind as a single token across internal whitespace while `notin`
//! must not — neither is expressible as an unambiguous longest-match regex
//! set without look-ahead.

use crate::error::UserError;
use crate::pos::{Cursor, Pos};

/// A scalar member of a list literal; lists are homogeneous in one of these
/// two kinds once grouping has validated them (see [`crate::group::listify`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ListValue {
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Str(String),
    Regex(String),
    Symbol(String),
    Equal,
    NotEqual,
    Match,
    And,
    Or,
    Not,
    In,
    NotIn,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    /// Produced by grouping (component C) from a `[...]` run; never emitted
    /// directly by the tokenizer.
    List(Vec<ListValue>),
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Str(_) => "string",
            TokenKind::Regex(_) => "regex",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::Match => "=~",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::In => "in",
            TokenKind::NotIn => "not in",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::List(_) => "list",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

/// Characters that may continue a symbol once begun (but not start one).
fn is_mid_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

struct Scanner<'a> {
    src: &'a str,
    byte: usize,
    cursor: Cursor,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner {
            src,
            byte: 0,
            cursor: Cursor::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.byte..]
    }

    fn pos(&self) -> Pos {
        self.cursor.pos
    }

    fn eof(&self) -> bool {
        self.byte >= self.src.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return one char, advancing position tracking.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.byte += c.len_utf8();
        self.cursor.advance(c);
        Some(c)
    }

    /// Whether `rest()` starts with `word` and the char following `word` (if
    /// any) is not a mid-symbol character — i.e. `word` ends at a boundary.
    fn matches_word_boundary(&self, word: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(word) {
            return false;
        }
        match rest[word.len()..].chars().next() {
            Some(c) => !is_mid_symbol_char(c),
            None => true,
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }
}

/// Tokenize `src` into a flat token stream, failing fast on the first error.
pub fn tokenize(src: &str) -> Result<Vec<Token>, UserError> {
    let mut sc = Scanner::new(src);
    let mut tokens = Vec::new();

    while !sc.eof() {
        let start = sc.pos();
        let c = sc.peek_char().expect("checked !eof");

        // Rule 1: quoted literal (string or regex).
        if c == '"' || c == '\'' || c == '/' {
            let delim = c;
            sc.bump();
            let mut payload = String::new();
            let mut closed = false;
            while let Some(ch) = sc.peek_char() {
                if ch == '\\' {
                    payload.push(ch);
                    sc.bump();
                    if let Some(escaped) = sc.peek_char() {
                        payload.push(escaped);
                        sc.bump();
                    }
                    continue;
                }
                if ch == delim {
                    sc.bump();
                    closed = true;
                    break;
                }
                payload.push(ch);
                sc.bump();
            }
            if !closed {
                return Err(if delim == '/' {
                    UserError::UnclosedRegex(start)
                } else {
                    UserError::UnclosedQuote(start)
                });
            }
            if delim == '/' {
                if let Err(e) = regex_automata::meta::Regex::new(&payload) {
                    return Err(UserError::UncompileableRegex {
                        source: payload,
                        pos: start,
                        underlying: e.to_string(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Regex(payload),
                    pos: start,
                });
            } else {
                tokens.push(Token {
                    kind: TokenKind::Str(payload),
                    pos: start,
                });
            }
            continue;
        }

        // Rule 2: single-char punctuation.
        let single = match c {
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        };
        if let Some(kind) = single {
            sc.bump();
            tokens.push(Token { kind, pos: start });
            continue;
        }

        // Rule 3: newline.
        if c == '\n' {
            sc.bump();
            continue;
        }

        // Rule 4: horizontal whitespace run.
        if c == ' ' || c == '\t' {
            while matches!(sc.peek_char(), Some(' ') | Some('\t')) {
                sc.bump();
            }
            continue;
        }

        // Rule 5: comment to end of line (consumes the trailing newline too).
        if c == '#' {
            while let Some(ch) = sc.peek_char() {
                sc.bump();
                if ch == '\n' {
                    break;
                }
            }
            continue;
        }

        // Rule 6: "not in" as a single token (literal "not", run of space/tab, "in").
        if sc.rest().starts_with("not") {
            let after_not = &sc.rest()[3..];
            let ws_len = after_not
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .count();
            if ws_len > 0 && after_not[ws_len..].starts_with("in") {
                sc.bump_n(3);
                for _ in 0..ws_len {
                    sc.bump();
                }
                sc.bump_n(2);
                tokens.push(Token {
                    kind: TokenKind::NotIn,
                    pos: start,
                });
                continue;
            }
        }

        // Rule 7: integer.
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while matches!(sc.peek_char(), Some(d) if d.is_ascii_digit()) {
                digits.push(sc.bump().unwrap());
            }
            let value: i64 = digits
                .parse()
                .map_err(|_| UserError::UnknownToken {
                    prefix: prefix_snippet(sc.rest()),
                    pos: start,
                })?;
            tokens.push(Token {
                kind: TokenKind::Int(value),
                pos: start,
            });
            continue;
        }

        // Rule 8: two-char operators.
        let two_char = [
            ("==", TokenKind::Equal),
            ("!=", TokenKind::NotEqual),
            ("&&", TokenKind::And),
            ("||", TokenKind::Or),
            ("=~", TokenKind::Match),
        ];
        let mut matched_two = false;
        for (text, kind) in two_char {
            if sc.rest().starts_with(text) {
                sc.bump_n(text.chars().count());
                tokens.push(Token { kind, pos: start });
                matched_two = true;
                break;
            }
        }
        if matched_two {
            continue;
        }

        // Rule 9: word operators, boundary-checked against a following
        // symbol-continuation char.
        let word_ops: [(&str, TokenKind); 4] = [
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("not", TokenKind::Not),
            ("in", TokenKind::In),
        ];
        let mut matched_word = false;
        for (word, kind) in word_ops {
            if sc.matches_word_boundary(word) {
                sc.bump_n(word.chars().count());
                tokens.push(Token { kind, pos: start });
                matched_word = true;
                break;
            }
        }
        if matched_word {
            continue;
        }

        // Rule 10: "!".
        if c == '!' {
            sc.bump();
            tokens.push(Token {
                kind: TokenKind::Not,
                pos: start,
            });
            continue;
        }

        // Rule 11: symbol (dotted identifier).
        if is_symbol_start(c) {
            let mut text = String::new();
            while matches!(sc.peek_char(), Some(ch) if is_mid_symbol_char(ch)) {
                text.push(sc.bump().unwrap());
            }
            tokens.push(Token {
                kind: TokenKind::Symbol(text),
                pos: start,
            });
            continue;
        }

        // Rule 12: unrecognized.
        let prefix = prefix_snippet(sc.rest());
        sc.bump();
        return Err(UserError::UnknownToken { prefix, pos: start });
    }

    Ok(tokens)
}

fn prefix_snippet(rest: &str) -> String {
    rest.chars().take(20).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn not_in_with_one_space() {
        assert_eq!(kinds("a not in b"), vec![
            TokenKind::Symbol("a".into()),
            TokenKind::NotIn,
            TokenKind::Symbol("b".into()),
        ]);
    }

    #[test]
    fn not_in_with_multiple_spaces() {
        assert_eq!(kinds("a not   in b"), vec![
            TokenKind::Symbol("a".into()),
            TokenKind::NotIn,
            TokenKind::Symbol("b".into()),
        ]);
    }

    #[test]
    fn notin_is_a_symbol() {
        assert_eq!(kinds("notin"), vec![TokenKind::Symbol("notin".into())]);
    }

    #[test]
    fn word_operator_adjacent_to_identifier_is_a_symbol() {
        assert_eq!(kinds("andy"), vec![TokenKind::Symbol("andy".into())]);
        assert_eq!(kinds("andy and bob"), vec![
            TokenKind::Symbol("andy".into()),
            TokenKind::And,
            TokenKind::Symbol("bob".into()),
        ]);
    }

    #[test]
    fn dotted_symbol() {
        assert_eq!(
            kinds("location.country"),
            vec![TokenKind::Symbol("location.country".into())]
        );
    }

    #[test]
    fn string_with_escaped_quote() {
        assert_eq!(kinds(r#""Jo\"hn""#), vec![TokenKind::Str(r#"Jo\"hn"#.into())]);
    }

    #[test]
    fn unclosed_quote_is_an_error() {
        assert!(matches!(tokenize(r#"name == "Jo"#), Err(UserError::UnclosedQuote(_))));
    }

    #[test]
    fn regex_with_escaped_slash_keeps_scanning() {
        assert_eq!(kinds(r#"a =~ /US\/UK/"#), vec![
            TokenKind::Symbol("a".into()),
            TokenKind::Match,
            TokenKind::Regex(r#"US\/UK"#.into()),
        ]);
    }

    #[test]
    fn regex_with_unescaped_slash_ends_early() {
        // The unescaped `/` between "US" and "UK" closes the regex right
        // there; the rest of the source is tokenized independently of the
        // intended pattern, not as part of it.
        let tokens = tokenize("a =~ /US/UK//").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Regex("US".into()));
        assert_eq!(tokens[3].kind, TokenKind::Symbol("UK".into()));
    }

    #[test]
    fn uncompileable_regex_is_an_error() {
        assert!(matches!(
            tokenize("a =~ /[/"),
            Err(UserError::UncompileableRegex { .. })
        ));
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(kinds("a == 1 # trailing\nb == 2"), vec![
            TokenKind::Symbol("a".into()),
            TokenKind::Equal,
            TokenKind::Int(1),
            TokenKind::Symbol("b".into()),
            TokenKind::Equal,
            TokenKind::Int(2),
        ]);
    }

    #[test]
    fn comment_at_eof_without_trailing_newline() {
        assert_eq!(kinds("a == 1 # no newline here"), vec![
            TokenKind::Symbol("a".into()),
            TokenKind::Equal,
            TokenKind::Int(1),
        ]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("a\n== 1").unwrap();
        assert_eq!(tokens[0].pos, Pos { line: 1, column: 1 });
        assert_eq!(tokens[1].pos, Pos { line: 2, column: 1 });
        assert_eq!(tokens[2].pos, Pos { line: 2, column: 4 });
    }
}
