use thiserror::Error;

use vignette_err::Category;
use vignette_features::Features;

use crate::read::{self, Reader};
use crate::token::{Kind, Token};
use crate::Span;

mod scan;

use self::scan::scan_token;

/// A fatal lexing error.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ErrorKind {
    #[error("unterminated string literal")]
    UnterminatedStr,
    #[error(transparent)]
    OutOfRange(#[from] read::Error),
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        match self {
            ErrorKind::UnterminatedStr => Category::Syntax,
            ErrorKind::OutOfRange(_) => Category::Bounds,
        }
    }
}

/// A spanned fatal lexing error.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{kind} at {span:?}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
}

/// Whitespace separating tokens.
pub fn is_whitespace(c: char) -> bool {
    match c {
        ' ' | '\t' | '\r' | '\n' => true,
        _ => false,
    }
}

/// Whitespace that doesn't break lines.
pub fn is_horizontal_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// A lexing stream over a source string that can be consumed as an iterator.
///
/// Tokens are scanned lazily, one per call. Comments are dropped unless the stream was
/// created `with_comments`. The stream ends after the first error.
#[derive(Clone, Debug)]
pub struct LexStream<'a> {
    reader: Reader<'a>,
    collapse_string_whitespace: bool,
    keep_comments: bool,
    fatal: bool,
}

impl<'a> LexStream<'a> {
    /// Creates a new lexing stream with the default features.
    pub fn new(src: &'a str, pos: u32) -> Self {
        Self::with_features(src, pos, &Features::default())
    }

    pub fn with_features(src: &'a str, pos: u32, features: &Features) -> Self {
        LexStream {
            reader: Reader::new(src, pos),
            collapse_string_whitespace: features.collapse_string_whitespace,
            keep_comments: false,
            fatal: false,
        }
    }

    /// Makes the stream yield `Comment` tokens instead of dropping them.
    pub fn with_comments(mut self) -> Self {
        self.keep_comments = true;
        self
    }

    /// Returns the current position of this stream in bytes.
    pub fn pos(&self) -> u32 {
        self.reader.pos()
    }

    /// Scans the next token. Returns `Ok(None)` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        if self.fatal {
            return Ok(None);
        }

        loop {
            match scan_token(&mut self.reader, self.collapse_string_whitespace) {
                Ok(Some(token)) if token.kind == Kind::Comment && !self.keep_comments => {}
                Ok(token) => return Ok(token),
                Err(err) => {
                    self.fatal = true;
                    return Err(err);
                }
            }
        }
    }
}

impl<'a> Iterator for LexStream<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Result<Token, Error>> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::token::Keyword;

    fn lex(source: &str) -> Vec<(Kind, String)> {
        LexStream::new(source, 0)
            .map(|token| {
                let token = token.expect("should lex without errors");
                (token.kind, token.value)
            })
            .collect()
    }

    fn lex_err(source: &str) -> Error {
        LexStream::new(source, 0)
            .find_map(Result::err)
            .expect("should fail to lex")
    }

    fn tok(kind: Kind, value: &str) -> (Kind, String) {
        (kind, value.to_owned())
    }

    #[test]
    fn can_lex_declarations() {
        assert_eq!(
            vec![
                tok(Kind::Keyword(Keyword::Author), "author"),
                tok(Kind::Ident, "a"),
                tok(Kind::OpenBrace, "{"),
                tok(Kind::CloseBrace, "}"),
                tok(Kind::Keyword(Keyword::Scene), "scene"),
                tok(Kind::Ident, "intro"),
                tok(Kind::OpenBrace, "{"),
                tok(Kind::Keyword(Keyword::Jump), "jump"),
                tok(Kind::Ident, "scenes"),
                tok(Kind::Str, "hi there"),
                tok(Kind::CloseBrace, "}"),
            ],
            lex("author a {}\nscene\tintro {\r\n  jump scenes \"hi there\" }"),
        );
    }

    #[test]
    fn identifiers_run_until_whitespace() {
        assert_eq!(
            vec![
                tok(Kind::Ident, "a{}"),
                tok(Kind::Ident, "すまん_不都合"),
                tok(Kind::Ident, "x\"y"),
                tok(Kind::Ident, "not#a-comment"),
                tok(Kind::Ident, "authors"),
            ],
            lex("a{} すまん_不都合 x\"y not#a-comment authors"),
        );
    }

    #[test]
    fn whitespace_and_comments_yield_nothing() {
        assert_eq!(Vec::<(Kind, String)>::new(), lex(""));
        assert_eq!(Vec::<(Kind, String)>::new(), lex(" \t\r\n"));
        assert_eq!(
            Vec::<(Kind, String)>::new(),
            lex("# one\n   #two\r\n\t#\n# \"unterminated in a comment")
        );
    }

    #[test]
    fn comments_are_invisible() {
        assert_eq!(lex("scene"), lex("# hello\nscene"));
        assert_eq!(lex("scene s { }"), lex("scene s # trailing { \n{ }# x"));
    }

    #[test]
    fn can_keep_comments() {
        let tokens = LexStream::new("#  hello world \r\nscene", 0)
            .with_comments()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            vec![
                Token::new(Kind::Comment, "hello world ", Span::new(0, 15)),
                Token::new(Kind::Keyword(Keyword::Scene), "scene", Span::new(17, 5)),
            ],
            tokens,
        );
    }

    #[test]
    fn can_lex_strings() {
        assert_eq!(vec![tok(Kind::Str, "abc\"def")], lex(r#""abc\"def""#));
        assert_eq!(vec![tok(Kind::Str, r"a\b")], lex(r#""a\\b""#));
        assert_eq!(vec![tok(Kind::Str, "nope")], lex(r#""\n\o\p\e""#));
        assert_eq!(vec![tok(Kind::Str, "")], lex(r#""""#));
        assert_eq!(vec![tok(Kind::Str, "{ scene }")], lex(r#""{ scene }""#));
    }

    #[test]
    fn strings_normalize_whitespace() {
        assert_eq!(vec![tok(Kind::Str, "a b")], lex("\"a  \t b\""));
        assert_eq!(vec![tok(Kind::Str, "one\ntwo")], lex("\"one\r\n    two\""));
        assert_eq!(vec![tok(Kind::Str, "\tx")], lex("\"\tx\""));
        assert_eq!(vec![tok(Kind::Str, "a \t")], lex("\"a\\ \\\t\""));
    }

    #[test]
    fn whitespace_collapse_can_be_disabled() {
        let features = Features {
            collapse_string_whitespace: false,
            ..Features::default()
        };
        let token = LexStream::with_features("\"a  b\r\n  c\"", 0, &features)
            .next()
            .unwrap()
            .unwrap();

        assert_eq!("a  b\n  c", token.value);
    }

    #[test]
    fn tokens_are_spanned() {
        let spans = LexStream::new("scene \"ツ\" {", 5)
            .map(|token| token.unwrap().span)
            .collect::<Vec<_>>();

        assert_eq!(
            vec![Span::new(5, 5), Span::new(11, 5), Span::new(17, 1)],
            spans
        );
    }

    #[test]
    fn unterminated_strings_are_errors() {
        assert_eq!(
            Error {
                kind: ErrorKind::UnterminatedStr,
                span: Span::new(6, 4),
            },
            lex_err("scene \"abc"),
        );
        assert_eq!(ErrorKind::UnterminatedStr, lex_err("\"abc\\\"").kind);
        assert_eq!(ErrorKind::UnterminatedStr, lex_err("\"abc\\").kind);
        assert_eq!(Category::Syntax, lex_err("\"").kind.category());
    }

    #[test]
    fn stream_ends_after_an_error() {
        let mut stream = LexStream::new("a \"b", 0);

        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
        assert_eq!(Ok(None), stream.next_token());
    }
}
