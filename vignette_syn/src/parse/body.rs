use vignette_err::{Category, ErrorBuilder};

use crate::ast;
use crate::lex;
use crate::token::{Keyword as K, Kind as T, Token};
use crate::Span;

use super::{Found, PResult, Parser};

/// The declaration owning a body, for diagnostics.
#[derive(Copy, Clone, Debug)]
pub(super) struct Decl<'s> {
    keyword: K,
    id: &'s str,
    span: Span,
}

impl<'s> Decl<'s> {
    pub(super) fn new(keyword: K, id: &'s str, span: Span) -> Self {
        Decl { keyword, id, span }
    }
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Result<Token, lex::Error>>,
{
    /// Skips the body of an author or branch declaration and returns the span of the
    /// closing brace.
    ///
    /// Braces inside the body nest unless `balanced_body_braces` is off, in which case the
    /// first `}` closes the body. Branches declared directly inside the body of an author
    /// are parsed and registered on `scene`. The opening brace can be left out with
    /// `optional_body_brace`.
    pub(super) fn parse_body(
        &mut self,
        decl: &Decl<'_>,
        mut scene: Option<&mut ast::Scene>,
    ) -> PResult<'a, Span> {
        if self.ctx.features.optional_body_brace {
            self.eat(T::OpenBrace)?;
        } else {
            self.eat_expected(T::OpenBrace)?;
        }

        let mut depth = 0usize;

        loop {
            match self.token.kind {
                T::CloseBrace if depth == 0 => return Ok(self.bump()?.span),
                T::CloseBrace => {
                    depth -= 1;
                    self.bump()?;
                }
                T::OpenBrace if self.ctx.features.balanced_body_braces => {
                    depth += 1;
                    self.bump()?;
                }
                T::Keyword(K::Branch) if depth == 0 && decl.keyword == K::Author => {
                    match scene.as_deref_mut() {
                        Some(scene) => self.parse_branch(scene)?,
                        None => {
                            let keyword = self.bump()?;
                            let (id, span) = self.eat_ident()?;
                            return Err(self
                                .ctx
                                .errors
                                .error(format!("branch `{}` declared outside of a scene", id))
                                .category(Category::Syntax)
                                .span(keyword.span.union(span))
                                .annotate_span(
                                    decl.span,
                                    format!("in {} `{}`", decl.keyword, decl.id),
                                ));
                        }
                    }
                }
                T::Eof => return Err(self.unclosed(decl)),
                _ => {
                    self.bump()?;
                }
            }
        }
    }

    /// Emits an error for a declaration left open at the current token.
    pub(super) fn unclosed(&mut self, decl: &Decl<'_>) -> &'a mut ErrorBuilder {
        let category = if self.is_eof() {
            Category::UnexpectedEof
        } else {
            Category::Syntax
        };

        self.ctx
            .errors
            .error(format!(
                "unclosed {} `{}`: expected `}}`, found {}",
                decl.keyword,
                decl.id,
                Found(&self.token)
            ))
            .category(category)
            .span(self.token.span)
            .annotate_span(decl.span, format!("{} opened here", decl.keyword))
    }
}

#[cfg(test)]
mod tests {
    use vignette_err::Category;
    use vignette_features::Features;

    use crate::ast::{Author, Scene};
    use crate::parse::test_utils::{assert_parse_with, assert_parse_with_features, parse_err};
    use crate::Span;

    #[test]
    fn bodies_are_balanced() {
        assert_parse_with("author a { { } { { \"}\" } } }", |author: Author| {
            assert_eq!(Span::new(0, 28), author.span);
        });
    }

    #[test]
    fn body_contents_are_ignored() {
        assert_parse_with(
            "scene s { branch b { scene author jump \"text\" x } }",
            |scene: Scene| {
                assert_eq!(0, scene.authors().count());
                assert_eq!(1, scene.branches().count());
                assert!(scene.branch("b").unwrap().block.is_empty());
            },
        );
    }

    #[test]
    fn unbalanced_bodies_are_unclosed() {
        let err = parse_err::<Author>("author a { { }");
        assert_eq!(Category::UnexpectedEof, err.category());
        assert_eq!(Some(Span::new(14, 0)), err.span());
        assert_eq!(
            "unclosed author `a`: expected `}`, found end of file",
            err.message().to_string()
        );
    }

    #[test]
    fn first_close_brace_ends_unbalanced_bodies() {
        let features = Features {
            balanced_body_braces: false,
            ..Features::default()
        };

        assert_parse_with_features(
            "author a { { { }",
            &features,
            |author: Author, _| assert_eq!(Span::new(0, 16), author.span),
        );

        assert_parse_with_features(
            "scene s { author a { { } branch b {} }",
            &Features::compatible(),
            |scene: Scene, warnings| {
                assert!(warnings.is_empty(), "{:#?}", warnings);
                assert_eq!(Span::new(10, 14), scene.author("a").unwrap().span);
                assert_eq!(Span::new(25, 11), scene.branch("b").unwrap().span);
                assert_eq!(Span::new(0, 38), scene.span);
            },
        );
    }

    #[test]
    fn optional_brace_still_needs_a_close() {
        assert_parse_with_features(
            "author a jump x }",
            &Features::compatible(),
            |author: Author, _| assert_eq!(Span::new(0, 17), author.span),
        );
    }
}
