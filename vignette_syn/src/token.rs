use std::fmt;

use super::Span;

macro_rules! decl_keyword {
    {
        pub enum Keyword {
            $(
                $(#[$attr:meta])*
                $keyword:ident = $value:ident,
            )*
        }
    } => {
        /// Reserved words of the language.
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[repr(u8)]
        pub enum Keyword {
            $(
                $(#[$attr])*
                $keyword,
            )*
        }

        impl Keyword {
            /// All keywords, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$keyword,)*];

            pub fn identify(s: &str) -> Option<Self> {
                $(
                    if (stringify!($value)) == s {
                        return Some(Self::$keyword);
                    }
                )*
                None
            }

            pub fn into_canonical_str(self) -> &'static str {
                match self {
                    $(
                        Self::$keyword => stringify!($value),
                    )*
                }
            }
        }

        impl fmt::Display for Keyword {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.into_canonical_str())
            }
        }
    };
}

decl_keyword! {
    pub enum Keyword {
        /// `author`
        Author = author,
        /// `scene`
        Scene = scene,
        /// `branch`
        Branch = branch,
        /// `jump`
        Jump = jump,
    }
}

/// Token kind.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Kind {
    /// Keyword
    Keyword(Keyword),
    /// Any other run of non-whitespace characters
    Ident,
    /// Double-quoted string literal. The token value is the unescaped content.
    Str,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `#` comment up to the end of the line
    Comment,
    /// End of the token stream. Never produced by the lexer; the parser uses it to
    /// stand in for the missing token.
    Eof,
}

/// A spanned token with its value.
///
/// The value is the source text for identifiers, keywords and braces, the text after
/// `#` for comments, and the unescaped content for string literals.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: Kind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new<S: Into<String>>(kind: Kind, value: S, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Token::new(Kind::Eof, String::new(), span)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Kind as K;

        match self {
            K::Keyword(kw) => write!(f, "`{}`", kw),
            K::Ident => write!(f, "identifier"),
            K::Str => write!(f, "string literal"),
            K::OpenBrace => write!(f, "`{{`"),
            K::CloseBrace => write!(f, "`}}`"),
            K::Comment => write!(f, "comment"),
            K::Eof => write!(f, "end of file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_identify_keywords() {
        for &keyword in Keyword::ALL {
            assert_eq!(
                Some(keyword),
                Keyword::identify(keyword.into_canonical_str())
            );
        }

        assert_eq!(None, Keyword::identify("Scene"));
        assert_eq!(None, Keyword::identify("authors"));
        assert_eq!(None, Keyword::identify(""));
    }

    #[test]
    fn kinds_display_for_diagnostics() {
        assert_eq!("`branch`", Kind::Keyword(Keyword::Branch).to_string());
        assert_eq!("`{`", Kind::OpenBrace.to_string());
        assert_eq!("`}`", Kind::CloseBrace.to_string());
        assert_eq!("end of file", Kind::Eof.to_string());
    }
}
