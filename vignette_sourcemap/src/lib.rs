//! Source-mapping for `vignette`.
//!
//! The lexer and parser address source text with byte positions only. This crate holds
//! the `Span` type they share and the facility for turning those byte positions back
//! into line and column locations when reporting diagnostics.

mod map;
mod span;

#[doc(inline)]
pub use map::{Location, SourceMap};
#[doc(inline)]
pub use span::{ErrorSpan, Span};
