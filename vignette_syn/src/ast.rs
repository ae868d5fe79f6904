use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::slice;

use hashbrown::HashMap;

use crate::Span;

pub mod visit;

/// A full parse result: scenes in source order, and the authors declared outside any
/// scene.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Document {
    pub scenes: Vec<Scene>,
    pub authors: Vec<Author>,
}

impl Document {
    /// Returns the first scene with `id`.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }
}

/// An author, identified by id alone.
#[derive(Clone, Eq, Debug)]
pub struct Author {
    pub id: String,
    pub span: Span,
}

impl Author {
    pub fn new<S: Into<String>>(id: S, span: Span) -> Self {
        Author {
            id: id.into(),
            span,
        }
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A named unit of the script holding a set of authors and a map of branches.
#[derive(Clone, Eq, Debug)]
pub struct Scene {
    pub id: String,
    pub span: Span,
    authors: HashMap<String, Author>,
    branches: HashMap<String, Branch>,
}

impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.authors == other.authors && self.branches == other.branches
    }
}

impl Scene {
    pub fn new<S: Into<String>>(id: S, span: Span) -> Self {
        Scene {
            id: id.into(),
            span,
            authors: HashMap::new(),
            branches: HashMap::new(),
        }
    }

    /// Adds `author` unless an author with the same id is already present. Returns `true`
    /// if it was added.
    pub fn add_author(&mut self, author: Author) -> bool {
        if self.authors.contains_key(&author.id) {
            return false;
        }

        self.authors.insert(author.id.clone(), author);
        true
    }

    /// Adds `branch`, replacing any branch with the same id. Returns the replaced branch.
    pub fn add_branch(&mut self, branch: Branch) -> Option<Branch> {
        self.branches.insert(branch.id.clone(), branch)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.get(id)
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.get(id)
    }

    /// Iterates over the authors in no particular order.
    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    /// Iterates over the branches in no particular order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    pub fn branches_mut(&mut self) -> impl Iterator<Item = &mut Branch> {
        self.branches.values_mut()
    }
}

/// A named sequence of steps within a scene.
#[derive(Clone, Eq, Debug)]
pub struct Branch {
    pub id: String,
    pub block: Block,
    pub span: Span,
}

impl Branch {
    /// Creates a branch with an empty block.
    pub fn new<S: Into<String>>(id: S, span: Span) -> Self {
        Branch {
            id: id.into(),
            block: Block::new(),
            span,
        }
    }
}

impl PartialEq for Branch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.block == other.block
    }
}

/// Ordered, append-only sequence of steps.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Block {
    steps: Vec<Step>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<Step>>(&mut self, step: S) {
        self.steps.push(step.into());
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl Index<usize> for Block {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Step;
    type IntoIter = slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Step {
    Action(Action),
    /// End of the branch.
    Return,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Action {
    Text(TextAction),
    Jump(JumpAction),
}

/// Displays a line of text.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TextAction {
    pub text: String,
}

/// Transfers control to the branch named `target`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct JumpAction {
    pub target: String,
}

impl From<Action> for Step {
    fn from(action: Action) -> Self {
        Step::Action(action)
    }
}

impl From<TextAction> for Step {
    fn from(action: TextAction) -> Self {
        Step::Action(Action::Text(action))
    }
}

impl From<JumpAction> for Step {
    fn from(action: JumpAction) -> Self {
        Step::Action(Action::Jump(action))
    }
}
