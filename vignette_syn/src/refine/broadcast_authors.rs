use crate::ast::visit::VisitMut;
use crate::ast::Document;

/// Adds every author declared outside of a scene to every scene of a document. Authors a
/// scene already declares are kept as they are.
#[derive(Copy, Clone, Debug, Default)]
pub struct BroadcastAuthors;

impl VisitMut for BroadcastAuthors {
    fn visit_document_mut(&mut self, document: &mut Document) {
        for scene in &mut document.scenes {
            for author in &document.authors {
                scene.add_author(author.clone());
            }
        }
    }
}
