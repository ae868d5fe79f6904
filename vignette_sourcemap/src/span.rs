use std::fmt::Display;

/// A range of bytes in the source, as a base position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Span {
    pub base: u32,
    pub len: u32,
}

impl Span {
    pub fn new(base: u32, len: u32) -> Self {
        Span { base, len }
    }

    /// Returns the position right after the last byte of this span.
    pub fn end(self) -> u32 {
        self.base + self.len
    }

    /// Returns the smallest span covering both `self` and `rhs`.
    pub fn union(self, rhs: Span) -> Span {
        let base = u32::min(self.base, rhs.base);
        let end = u32::max(self.end(), rhs.end());

        Span::new(base, end - base)
    }

    /// Returns an empty span right after `self`.
    pub fn shrink_to_end(self) -> Span {
        Span::new(self.end(), 0)
    }
}

/// A main span with secondary annotated spans, used by diagnostics.
#[derive(Clone, Debug)]
pub struct ErrorSpan {
    pub main: Span,
    pub annotations: Vec<(Span, String)>,
}

impl ErrorSpan {
    pub fn new(main: Span) -> Self {
        ErrorSpan {
            main,
            annotations: Vec::new(),
        }
    }

    pub fn annotate<S: Display>(&mut self, span: Span, msg: S) -> &mut Self {
        self.annotations.push((span, msg.to_string()));
        self
    }
}

impl From<Span> for ErrorSpan {
    fn from(span: Span) -> Self {
        ErrorSpan::new(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both_spans() {
        assert_eq!(Span::new(2, 8), Span::new(2, 3).union(Span::new(7, 3)));
        assert_eq!(Span::new(2, 8), Span::new(7, 3).union(Span::new(2, 3)));
        assert_eq!(Span::new(0, 4), Span::new(0, 0).union(Span::new(1, 3)));
    }

    #[test]
    fn shrink_to_end_is_empty() {
        assert_eq!(Span::new(20, 0), Span::new(15, 5).shrink_to_end());
        assert_eq!(Span::new(15, 0), Span::new(15, 0).shrink_to_end());
    }

    #[test]
    fn annotations_keep_their_order() {
        let mut span = ErrorSpan::from(Span::new(9, 0));
        span.annotate(Span::new(0, 5), "first").annotate(Span::new(6, 1), "second");

        assert_eq!(Span::new(9, 0), span.main);
        assert_eq!(
            vec![
                (Span::new(0, 5), "first".to_owned()),
                (Span::new(6, 1), "second".to_owned()),
            ],
            span.annotations
        );
    }
}
