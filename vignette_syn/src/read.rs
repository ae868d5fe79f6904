//! Character cursor over a source string.

use std::convert::TryFrom;

use thiserror::Error;

/// A read past the end of the source.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum Error {
    #[error("cannot read {requested} characters at position {pos}, only {available} left")]
    OutOfRange {
        pos: u32,
        requested: usize,
        available: usize,
    },
}

/// Sequential cursor over an immutable source string with arbitrary lookahead.
///
/// Counts passed to `peek` and `read` are in characters. Positions are in bytes and
/// include the `span_base` the reader was created with.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    src: &'a str,
    span_base: u32,
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `src`, whose first byte sits at position `span_base`.
    pub fn new(src: &'a str, span_base: u32) -> Self {
        Reader {
            src,
            span_base,
            offset: 0,
        }
    }

    /// Returns the current position in bytes.
    ///
    /// # Panics
    ///
    /// If the position doesn't fit in a `u32`.
    pub fn pos(&self) -> u32 {
        u32::try_from(self.offset)
            .ok()
            .and_then(|offset| self.span_base.checked_add(offset))
            .expect("source position should fit in a u32")
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        self.src.get(self.offset..).unwrap_or("")
    }

    /// Returns the next `k` characters without advancing.
    ///
    /// # Errors
    ///
    /// If fewer than `k` characters are left.
    pub fn peek(&self, k: usize) -> Result<&'a str, Error> {
        let rest = self.rest();
        if k == 0 {
            return Ok(&rest[..0]);
        }

        match rest.char_indices().nth(k - 1) {
            Some((idx, c)) => Ok(&rest[..idx + c.len_utf8()]),
            None => Err(Error::OutOfRange {
                pos: self.pos(),
                requested: k,
                available: rest.chars().count(),
            }),
        }
    }

    /// Returns the next `k` characters and advances past them.
    ///
    /// # Errors
    ///
    /// If fewer than `k` characters are left. The cursor does not move in that case.
    pub fn read(&mut self, k: usize) -> Result<&'a str, Error> {
        let chunk = self.peek(k)?;
        self.offset += chunk.len();
        Ok(chunk)
    }

    /// Returns the next character without advancing, or `None` at the end.
    pub fn first(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances past the next character and returns it, or `None` at the end.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.first()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Counts the characters ahead for which `pred` holds, without advancing.
    pub fn count_while<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        self.rest().chars().take_while(|&c| pred(c)).count()
    }

    /// Advances past every character for which `pred` holds.
    pub fn skip_while<F>(&mut self, mut pred: F)
    where
        F: FnMut(char) -> bool,
    {
        while let Some(c) = self.first() {
            if !pred(c) {
                break;
            }
            self.offset += c.len_utf8();
        }
    }
}
