use crate::ast;
use crate::lex;
use crate::token::{Keyword as K, Kind as T, Token};
use crate::Span;

use super::body::Decl;
use super::{Found, PResult, Parser};

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Result<Token, lex::Error>>,
{
    /// Parse `scene` IDENT `{` item* `}`.
    ///
    /// Authors declared in the scene are attached once the scene is closed. Branches are
    /// registered as they are parsed.
    pub fn parse_scene(&mut self) -> PResult<'a, ast::Scene> {
        let keyword = self.eat_expected(T::Keyword(K::Scene))?;
        let (id, _) = self.eat_ident()?;
        let decl = Decl::new(K::Scene, &id, keyword.span);
        self.eat_expected(T::OpenBrace)?;

        let mut scene = ast::Scene::new(id.as_str(), keyword.span);
        let mut authors = Vec::new();

        let close = loop {
            match self.token.kind {
                T::Keyword(K::Author) => authors.push(self.parse_author(Some(&mut scene))?),
                T::Keyword(K::Branch) => self.parse_branch(&mut scene)?,
                T::CloseBrace => break self.bump()?,
                T::Eof => return Err(self.unclosed(&decl)),
                _ if self.ctx.features.lenient_scene_items => {
                    self.ctx
                        .errors
                        .warn(format!(
                            "unexpected {} in scene `{}`, skipping it",
                            Found(&self.token),
                            id
                        ))
                        .span(self.token.span);
                    self.bump()?;
                }
                _ => {
                    return Err(self.expect_one_of(&[
                        T::Keyword(K::Author),
                        T::Keyword(K::Branch),
                        T::CloseBrace,
                    ]))
                }
            }
        };

        scene.span = keyword.span.union(close.span);
        for author in authors {
            scene.add_author(author);
        }

        Ok(scene)
    }

    /// Parse an `author` outside of any scene.
    pub fn parse_top_level_author(&mut self) -> PResult<'a, ast::Author> {
        self.parse_author(None)
    }

    /// Parse `author` IDENT `{` body `}`. Branches declared in the body are registered on
    /// `scene`, and are errors if there is none.
    pub fn parse_author(&mut self, scene: Option<&mut ast::Scene>) -> PResult<'a, ast::Author> {
        let keyword = self.eat_expected(T::Keyword(K::Author))?;
        let (id, _) = self.eat_ident()?;

        let close = self.parse_body(&Decl::new(K::Author, &id, keyword.span), scene)?;

        Ok(ast::Author::new(id, keyword.span.union(close)))
    }

    /// Parse `branch` IDENT `{` body `}` and register the branch on `scene`, replacing any
    /// earlier branch with the same id.
    pub fn parse_branch(&mut self, scene: &mut ast::Scene) -> PResult<'a, ()> {
        let keyword = self.eat_expected(T::Keyword(K::Branch))?;
        let (id, _) = self.eat_ident()?;

        let close = self.parse_body(&Decl::new(K::Branch, &id, keyword.span), None)?;
        let span: Span = keyword.span.union(close);

        if let Some(replaced) = scene.add_branch(ast::Branch::new(id.as_str(), span)) {
            self.ctx
                .errors
                .warn(format!(
                    "branch `{}` is defined more than once in scene `{}`, the last definition is used",
                    id, scene.id
                ))
                .span(span)
                .annotate_span(replaced.span, "previously defined here");
        }

        Ok(())
    }
}
