use crate::ast;
use crate::lex;
use crate::refine;
use crate::token::{Keyword as K, Kind as T, Token};

use super::{PResult, Parser};

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = Result<Token, lex::Error>>,
{
    /// Parse a document until end of input, then attach top-level authors to every scene.
    pub fn parse_document(&mut self) -> PResult<'a, ast::Document> {
        let mut document = ast::Document::default();

        while !self.is_eof() {
            if self.check_keyword(K::Author) {
                let author = self.parse_top_level_author()?;
                document.authors.push(author);
            } else if self.check_keyword(K::Scene) {
                let scene = self.parse_scene()?;
                document.scenes.push(scene);
            } else {
                return Err(self.expect_one_of(&[T::Keyword(K::Author), T::Keyword(K::Scene)]));
            }
        }

        refine::refine(&mut document);

        Ok(document)
    }
}
