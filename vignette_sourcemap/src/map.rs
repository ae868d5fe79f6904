use std::fmt;

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line index over a single source string, mapping byte positions to `Location`s.
#[derive(Clone, Debug)]
pub struct SourceMap<'a> {
    source: &'a str,
    span_base: u32,
    /// Byte offsets (relative to `source`) at which each line starts.
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    /// Indexes `source`, whose first byte sits at position `span_base`.
    pub fn new(source: &'a str, span_base: u32) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();

        SourceMap {
            source,
            span_base,
            line_starts,
        }
    }

    /// Returns the location of byte position `pos`, or `None` if `pos` is outside
    /// the source. The position right after the last byte is inside.
    pub fn locate(&self, pos: u32) -> Option<Location> {
        let offset = pos.checked_sub(self.span_base)? as usize;
        if offset > self.source.len() || !self.source.is_char_boundary(offset) {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Some(Location {
            line: line as u32 + 1,
            column: column as u32 + 1,
        })
    }

    /// Returns the text of the 1-based line `line`, without its line break.
    pub fn line(&self, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.source.len(), |next| next - 1);

        Some(self.source[start..end].trim_end_matches('\r'))
    }
}
