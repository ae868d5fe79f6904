use super::*;

pub trait Visit<'ast> {
    fn visit_document(&mut self, document: &'ast Document) {
        for author in &document.authors {
            self.visit_author(author);
        }
        for scene in &document.scenes {
            self.visit_scene(scene);
        }
    }

    fn visit_scene(&mut self, scene: &'ast Scene) {
        for author in scene.authors() {
            self.visit_author(author);
        }
        for branch in scene.branches() {
            self.visit_branch(branch);
        }
    }

    #[allow(unused_variables)]
    fn visit_author(&mut self, author: &'ast Author) {}

    fn visit_branch(&mut self, branch: &'ast Branch) {
        self.visit_block(&branch.block);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        for step in block {
            self.visit_step(step);
        }
    }

    #[allow(unused_variables)]
    fn visit_step(&mut self, step: &'ast Step) {}
}

pub trait VisitMut {
    fn visit_document_mut(&mut self, document: &mut Document) {
        for author in &mut document.authors {
            self.visit_author_mut(author);
        }
        for scene in &mut document.scenes {
            self.visit_scene_mut(scene);
        }
    }

    // Scene authors are keyed by id and can't be handed out mutably.
    fn visit_scene_mut(&mut self, scene: &mut Scene) {
        for branch in scene.branches_mut() {
            self.visit_branch_mut(branch);
        }
    }

    #[allow(unused_variables)]
    fn visit_author_mut(&mut self, author: &mut Author) {}

    fn visit_branch_mut(&mut self, branch: &mut Branch) {
        self.visit_block_mut(&mut branch.block);
    }

    #[allow(unused_variables)]
    fn visit_block_mut(&mut self, block: &mut Block) {}
}

pub trait Visitable {
    fn visit_with<'ast, V: Visit<'ast>>(&'ast self, visitor: &mut V);
    fn visit_mut_with<V: VisitMut>(&mut self, visitor: &mut V);
}

macro_rules! impl_visitable {
    {
        $(
            impl Visitable for $ast_type:ident {
                fn visit_with = $visit_fn:ident;
                fn visit_mut_with = $visit_mut_fn:ident;
            }
        )*
    } => {
        $(
            impl Visitable for $ast_type {
                fn visit_with<'ast, V: Visit<'ast>>(&'ast self, visitor: &mut V) {
                    visitor.$visit_fn(self);
                }
                fn visit_mut_with<V: VisitMut>(&mut self, visitor: &mut V) {
                    visitor.$visit_mut_fn(self);
                }
            }
        )*
    };
}

impl_visitable! {
    impl Visitable for Document {
        fn visit_with = visit_document;
        fn visit_mut_with = visit_document_mut;
    }
    impl Visitable for Scene {
        fn visit_with = visit_scene;
        fn visit_mut_with = visit_scene_mut;
    }
    impl Visitable for Author {
        fn visit_with = visit_author;
        fn visit_mut_with = visit_author_mut;
    }
    impl Visitable for Branch {
        fn visit_with = visit_branch;
        fn visit_mut_with = visit_branch_mut;
    }
    impl Visitable for Block {
        fn visit_with = visit_block;
        fn visit_mut_with = visit_block_mut;
    }
}
