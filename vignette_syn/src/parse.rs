use std::fmt::{self, Display};

use hashbrown::HashSet;
use vignette_err::{Category, Error, ErrorBuilder, ErrorCtx, Level};
use vignette_features::Features;

use crate::ast;
use crate::lex::{self, LexStream};
use crate::token::{Keyword, Kind as TokenKind, Token};
use crate::Span;

mod body;
mod document;
mod scene;

#[derive(Debug)]
pub struct ParseCtx<'a> {
    pub errors: &'a ErrorCtx,
    pub features: &'a Features,
    pub span_base: u32,
}

#[derive(Debug)]
struct Parser<'a, I> {
    token: Token,
    last_token: Token,
    expected_tokens: Vec<TokenKind>,
    token_stream: I,
    ctx: ParseCtx<'a>,
}

type PResult<'a, T> = std::result::Result<T, &'a mut ErrorBuilder>;

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Result<Token, lex::Error>>,
{
    fn new(ctx: ParseCtx<'a>, token_stream: I) -> PResult<'a, Self> {
        let start = Span::new(ctx.span_base, 0);
        let mut parser = Parser {
            token: Token::eof(start),
            last_token: Token::eof(start),
            expected_tokens: Vec::new(),
            token_stream,
            ctx,
        };

        parser.bump()?;
        Ok(parser)
    }

    /// Advances to the next token and returns the one that was current. Lexing errors
    /// surface here.
    fn bump(&mut self) -> PResult<'a, Token> {
        let next = loop {
            match self.token_stream.next() {
                Some(Ok(token)) if token.kind == TokenKind::Comment => {}
                Some(Ok(token)) => break token,
                Some(Err(err)) => {
                    return Err(self
                        .ctx
                        .errors
                        .error(&err.kind)
                        .category(err.kind.category())
                        .span(err.span))
                }
                None => break Token::eof(self.token.span.shrink_to_end()),
            }
        };

        self.last_token = std::mem::replace(&mut self.token, next);
        self.expected_tokens.clear();

        Ok(self.last_token.clone())
    }

    fn is_eof(&self) -> bool {
        self.token.kind == TokenKind::Eof
    }

    /// Checks if the current token matches `kind`. This adds the token to `expected_tokens`
    /// on failure.
    #[must_use]
    fn check(&mut self, kind: TokenKind) -> bool {
        let is_current = self.token.kind == kind;
        if !is_current {
            self.expected_tokens.push(kind);
        }
        is_current
    }

    #[must_use]
    fn check_keyword(&mut self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    /// Eats a token if it matches `kind` and returns it. This adds the token to
    /// `expected_tokens` on failure.
    fn eat(&mut self, kind: TokenKind) -> PResult<'a, Option<Token>> {
        if self.check(kind) {
            self.bump().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Eats a token of `kind`, or fails with an "expected" error.
    fn eat_expected(&mut self, kind: TokenKind) -> PResult<'a, Token> {
        match self.eat(kind)? {
            Some(token) => Ok(token),
            None => Err(self.expect(kind)),
        }
    }

    /// Eats an `Ident`, returning its value and span, or fails with an "expected" error.
    fn eat_ident(&mut self) -> PResult<'a, (String, Span)> {
        let token = self.eat_expected(TokenKind::Ident)?;
        Ok((token.value, token.span))
    }

    fn expect(&mut self, kind: TokenKind) -> &'a mut ErrorBuilder {
        self.expect_one_of(&[kind])
    }

    /// Emits an error listing `expected` and every token checked since the last bump.
    /// Running into the end of the input is reported as `UnexpectedEof`.
    fn expect_one_of(&mut self, expected: &[TokenKind]) -> &'a mut ErrorBuilder {
        let mut expected = expected
            .iter()
            .copied()
            .chain(self.expected_tokens.drain(..))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        expected.sort();

        if expected.is_empty() {
            panic!("must expect at least one token");
        }

        let found = Found(&self.token);
        let msg = if expected.len() == 1 {
            format!("expected {}, found {}", TokenChoice(&expected), found)
        } else {
            format!("expected one of {}, found {}", TokenChoice(&expected), found)
        };

        let category = if self.is_eof() {
            Category::UnexpectedEof
        } else {
            Category::Syntax
        };

        self.ctx
            .errors
            .error(msg)
            .category(category)
            .span(self.token.span)
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct TokenChoice<'a>(&'a [TokenKind]);

impl<'a> Display for TokenChoice<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();

        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        } else {
            return Ok(());
        }

        for t in iter {
            write!(f, ", {}", t)?;
        }

        Ok(())
    }
}

/// Describes an unexpected token, including the text of identifiers.
#[derive(Copy, Clone, Debug)]
struct Found<'a>(&'a Token);

impl<'a> Display for Found<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind {
            TokenKind::Ident => write!(f, "identifier `{}`", self.0.value),
            kind => write!(f, "{}", kind),
        }
    }
}

/// An AST node parsed from source, with the warnings emitted along the way.
#[derive(Debug)]
pub struct Parsed<T> {
    pub ast: T,
    pub warnings: Vec<Error>,
}

/// Trait for AST types that can be parsed.
pub trait Parse: Sized + private::Sealed {
    /// Parse an AST node with a shared parsing context. Errors are emitted into `ctx`.
    ///
    /// This emits an error if `partial` is `false` and the input is not completely consumed.
    fn partial_parse_with_ctx<I>(partial: bool, ctx: ParseCtx<'_>, token_stream: I) -> Result<Self, ()>
    where
        I: IntoIterator<Item = Result<Token, lex::Error>>;

    /// Parse an AST node with a shared parsing context. Errors are emitted into `ctx`.
    ///
    /// This emits an error if the input is not completely consumed.
    fn parse_with_ctx<I>(ctx: ParseCtx<'_>, token_stream: I) -> Result<Self, ()>
    where
        I: IntoIterator<Item = Result<Token, lex::Error>>,
    {
        Self::partial_parse_with_ctx(false, ctx, token_stream)
    }

    /// Convenience method for parsing source without a shared context.
    ///
    /// This emits an error if `partial` is `false` and the input is not completely consumed.
    ///
    /// # Errors
    ///
    /// If the parser emits an error. The `Err` variant holds every diagnostic emitted,
    /// warnings included, in emission order.
    fn partial_parse_with_features(
        partial: bool,
        source: &str,
        span_base: u32,
        features: &Features,
    ) -> Result<Parsed<Self>, Vec<Error>> {
        let errors = ErrorCtx::new();
        let lex_stream = LexStream::with_features(source, span_base, features);

        let ast = Self::partial_parse_with_ctx(
            partial,
            ParseCtx {
                errors: &errors,
                features,
                span_base,
            },
            lex_stream,
        );

        let mut diagnostics = errors.finish();
        let has_fatal = diagnostics.iter().any(|err| err.level().is_fatal());

        match ast {
            Ok(ast) if !has_fatal => Ok(Parsed {
                ast,
                warnings: diagnostics,
            }),
            _ => {
                if !has_fatal {
                    diagnostics
                        .push(ErrorBuilder::new(Level::Bug, "parsing failed without an error").done());
                }
                Err(diagnostics)
            }
        }
    }

    /// Convenience method for parsing source without a shared context.
    ///
    /// This emits an error if the input is not completely consumed.
    ///
    /// # Errors
    ///
    /// If the parser emits an error.
    fn parse_with_features(
        source: &str,
        span_base: u32,
        features: &Features,
    ) -> Result<Parsed<Self>, Vec<Error>> {
        Self::partial_parse_with_features(false, source, span_base, features)
    }

    /// Convenience method for parsing source with the default features.
    ///
    /// # Errors
    ///
    /// If the parser emits an error.
    fn parse(source: &str, span_base: u32) -> Result<Parsed<Self>, Vec<Error>> {
        Self::parse_with_features(source, span_base, &Features::default())
    }
}

macro_rules! impl_parse {
    {
        $(
            impl Parse for ast::$ast_type:ident => $parse_method:ident;
        )*
    } => {
        $(
            impl private::Sealed for ast::$ast_type {}
            impl Parse for ast::$ast_type {
                fn partial_parse_with_ctx<I>(
                    partial: bool,
                    ctx: ParseCtx<'_>,
                    token_stream: I,
                ) -> Result<Self, ()>
                where
                    I: IntoIterator<Item = Result<Token, lex::Error>>,
                {
                    let mut parser = Parser::new(ctx, token_stream.into_iter()).map_err(|_| ())?;
                    let result = parser.$parse_method().map_err(|_| ())?;
                    if !partial && !parser.is_eof() {
                        parser.expect(TokenKind::Eof);
                        return Err(());
                    }
                    Ok(result)
                }
            }
        )*
    }
}

impl_parse! {
    impl Parse for ast::Document => parse_document;
    impl Parse for ast::Scene => parse_scene;
    impl Parse for ast::Author => parse_top_level_author;
}

mod private {
    pub trait Sealed {}
}

#[cfg(test)]
mod test_utils {
    use super::*;

    // Use pretty_assertions for `assert_eq` diffs.
    use pretty_assertions::assert_eq;

    pub fn assert_parse_with_features<T, F>(source: &str, features: &Features, op: F)
    where
        T: Parse,
        F: FnOnce(T, Vec<Error>),
    {
        let parsed = T::parse_with_features(source, 0, features).unwrap_or_else(|err| {
            panic!(
                "errors parsing source:```\n{}\n```\nerrors: {:#?}",
                source, err
            );
        });
        op(parsed.ast, parsed.warnings);
    }

    pub fn assert_parse_with<T, F>(source: &str, op: F)
    where
        T: Parse,
        F: FnOnce(T),
    {
        assert_parse_with_features(source, &Features::default(), |ast, warnings| {
            assert!(warnings.is_empty(), "unexpected warnings: {:#?}", warnings);
            op(ast);
        })
    }

    pub fn assert_parse<T>(source: &str, expected: T)
    where
        T: Parse + Eq + fmt::Debug,
    {
        assert_parse_with(source, |ast: T| assert_eq!(expected, ast));
    }

    /// Parses `source`, expecting failure, and returns the single fatal diagnostic.
    pub fn parse_err_with_features<T>(source: &str, features: &Features) -> Error
    where
        T: Parse + fmt::Debug,
    {
        let errors = match T::parse_with_features(source, 0, features) {
            Ok(parsed) => panic!("parsed successfully: {:#?}", parsed.ast),
            Err(errors) => errors,
        };

        let mut fatal = errors
            .into_iter()
            .filter(|err| err.level().is_fatal())
            .collect::<Vec<_>>();
        assert_eq!(1, fatal.len(), "expected exactly one fatal error");
        fatal.remove(0)
    }

    pub fn parse_err<T>(source: &str) -> Error
    where
        T: Parse + fmt::Debug,
    {
        parse_err_with_features::<T>(source, &Features::default())
    }
}
