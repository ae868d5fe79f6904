//! Transforms run over a parsed AST.

use crate::ast::visit::Visitable;

mod broadcast_authors;

pub use self::broadcast_authors::BroadcastAuthors;

/// Run all refine transforms on a `Visitable` AST type.
pub fn refine<A: Visitable>(ast: &mut A) {
    ast.visit_mut_with(&mut BroadcastAuthors);
}
