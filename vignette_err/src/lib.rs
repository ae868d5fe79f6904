//! Diagnostics for `vignette`.
//!
//! This crate defines the types used to construct diagnostics across the `vignette`
//! crates. Components emit into a shared [`ErrorCtx`] and hand back the builder so
//! callers can attach spans and annotations before the diagnostic is finished.

use std::fmt::{self, Display};

use typed_arena::Arena;

mod error;

#[doc(inline)]
pub use error::{Error, ErrorBuilder};

/// Diagnostic levels.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Level {
    /// Warnings are diagnostic messages that don't prevent parsing.
    Warning,
    /// Errors are issues in the source that prevent parsing.
    Error,
    /// Bugs indicate programming errors in `vignette` itself. They prevent parsing.
    Bug,
}

impl Level {
    /// Returns `true` if diagnostics of this level make a parse fail.
    pub fn is_fatal(self) -> bool {
        self >= Level::Error
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Level::Warning => f.write_str("warning"),
            Level::Error => f.write_str("error"),
            Level::Bug => f.write_str("bug"),
        }
    }
}

/// Broad classification of a diagnostic, for callers that need to tell failures apart
/// without matching on messages.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Category {
    /// A read past the end of the source buffer.
    Bounds,
    /// Malformed input: an unterminated literal, or an unexpected token.
    Syntax,
    /// The input ended before an open construct was closed.
    UnexpectedEof,
    /// Anything else, such as warnings and internal bugs.
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Bounds => f.write_str("bounds"),
            Category::Syntax => f.write_str("syntax"),
            Category::UnexpectedEof => f.write_str("unexpected-eof"),
            Category::Other => f.write_str("other"),
        }
    }
}

/// A context for emitting errors.
#[derive(Default)]
pub struct ErrorCtx {
    errors: Arena<ErrorBuilder>,
}

impl fmt::Debug for ErrorCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorCtx { .. }")
    }
}

// This is safe because `Arena::alloc` always allocates new memory. No aliases to the
// same memory locations are ever created.
#[allow(clippy::mut_from_ref)]
impl ErrorCtx {
    /// Create a new empty `ErrorCtx`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.errors.len() == 0
    }

    /// Add a new warning.
    pub fn warn<S: Display>(&self, msg: S) -> &mut ErrorBuilder {
        self.errors.alloc(ErrorBuilder::new(Level::Warning, msg))
    }

    /// Add a new error.
    pub fn error<S: Display>(&self, msg: S) -> &mut ErrorBuilder {
        self.errors.alloc(ErrorBuilder::new(Level::Error, msg))
    }

    /// Finishes every diagnostic, in emission order.
    pub fn finish(self) -> Vec<Error> {
        self.errors
            .into_vec()
            .into_iter()
            .map(ErrorBuilder::done)
            .collect()
    }
}
