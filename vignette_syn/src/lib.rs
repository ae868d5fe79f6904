//! Parser for the vignette scenario language.
//!
//! This crate is mostly intended to be an internal dependency of `vignette`, the user-facing
//! API. It contains a character reader, a lexer, the AST definitions for scenes, authors and
//! branches, and a parser producing them. All components assume that a source resides in a
//! continuous space starting at a `span_base` that can be indexed using byte positions.

pub mod ast;
pub mod lex;
pub mod parse;
pub mod read;
pub mod refine;
pub mod token;

pub use vignette_sourcemap::Span;
