//! A parser for the vignette scenario language.
//!
//! A vignette source is a sequence of `scene` and `author` declarations. Scenes hold authors
//! and named branches; authors declared outside of any scene take part in every scene.
//!
//! ```
//! let parsed = vignette::parse("author narrator {}\nscene intro { branch start { } }").unwrap();
//! let intro = parsed.ast.scene("intro").unwrap();
//!
//! assert!(intro.author("narrator").is_some());
//! assert!(intro.branch("start").is_some());
//! ```

use vignette_syn::parse::Parse;

#[doc(inline)]
pub use vignette_err::{Category, Error, Level};
#[doc(inline)]
pub use vignette_features::Features;
#[doc(inline)]
pub use vignette_sourcemap::{Location, SourceMap, Span};
#[doc(inline)]
pub use vignette_syn::ast::{
    Action, Author, Block, Branch, Document, JumpAction, Scene, Step, TextAction,
};
#[doc(inline)]
pub use vignette_syn::parse::Parsed;

/// Parses a whole source with the default features.
///
/// # Errors
///
/// If the source can't be parsed. The `Err` variant holds every diagnostic emitted, warnings
/// included.
pub fn parse(source: &str) -> Result<Parsed<Document>, Vec<Error>> {
    parse_with_features(source, &Features::default())
}

/// Parses a whole source.
///
/// # Errors
///
/// If the source can't be parsed. The `Err` variant holds every diagnostic emitted, warnings
/// included.
pub fn parse_with_features(
    source: &str,
    features: &Features,
) -> Result<Parsed<Document>, Vec<Error>> {
    Document::parse_with_features(source, 0, features)
}

/// Renders a diagnostic with the source lines it points at.
///
/// ```text
/// error[syntax]: expected `{`, found identifier `x`
///   --> 1:9
///   |
/// 1 | scene s x
///   |         ^
/// ```
pub fn render(err: &Error, source_map: &SourceMap<'_>) -> String {
    let mut out = err.to_string();

    if let Some(spans) = err.annotated_spans() {
        render_span(&mut out, source_map, spans.main, '^', None);
        for (span, msg) in &spans.annotations {
            render_span(&mut out, source_map, *span, '-', Some(msg));
        }
    }

    out
}

fn render_span(
    out: &mut String,
    source_map: &SourceMap<'_>,
    span: Span,
    marker: char,
    note: Option<&str>,
) {
    let start = match source_map.locate(span.base) {
        Some(location) => location,
        None => {
            out.push_str(&format!("\n  --> {}..{}", span.base, span.end()));
            return;
        }
    };

    let line = source_map.line(start.line).unwrap_or_default();
    let width = match source_map.locate(span.end()) {
        Some(end) if end.line == start.line => end.column - start.column,
        _ => (line.chars().count() as u32 + 1).saturating_sub(start.column),
    };

    let gutter = " ".repeat(start.line.to_string().len());
    out.push_str(&format!("\n{} --> {}", gutter, start));
    out.push_str(&format!("\n{} |", gutter));
    out.push_str(&format!("\n{} | {}", start.line, line));
    out.push_str(&format!(
        "\n{} | {}{}",
        gutter,
        " ".repeat(start.column as usize - 1),
        marker.to_string().repeat(width.max(1) as usize),
    ));

    if let Some(note) = note {
        out.push(' ');
        out.push_str(note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn single_error(source: &str, features: &Features) -> Error {
        let mut errors = parse_with_features(source, features).unwrap_err();
        assert_eq!(1, errors.len(), "{:#?}", errors);
        errors.remove(0)
    }

    #[test]
    fn can_parse_documents() {
        let source = concat!(
            "# The opening.\n",
            "author narrator {}\n",
            "scene intro {\n",
            "    author guide { branch hint { \"Look left.\" } }\n",
            "    branch start {\n",
            "        \"Hello!\"\n",
            "        jump hint\n",
            "    }\n",
            "}\n",
            "scene outro {}\n",
        );

        let parsed = parse(source).unwrap();
        assert!(parsed.warnings.is_empty());

        let document = parsed.ast;
        assert_eq!(1, document.authors.len());
        assert_eq!(2, document.scenes.len());

        let intro = document.scene("intro").unwrap();
        assert_eq!(2, intro.authors().count());
        assert!(intro.branch("hint").is_some());
        assert!(intro.branch("start").is_some());

        let outro = document.scene("outro").unwrap();
        assert!(outro.author("narrator").is_some());
        assert_eq!(0, outro.branches().count());
    }

    #[test]
    fn warnings_are_returned_alongside_the_ast() {
        let parsed = parse("scene s { jump }").unwrap();

        assert_eq!(1, parsed.ast.scenes.len());
        assert_eq!(1, parsed.warnings.len());
        assert_eq!(Level::Warning, parsed.warnings[0].level());
    }

    #[test]
    fn strict_features_reject_stray_tokens() {
        let err = single_error("scene s { jump }", &Features::strict());
        assert_eq!(Level::Error, err.level());
        assert_eq!(Category::Syntax, err.category());
    }

    #[test]
    fn renders_diagnostics() {
        let source = "scene s x";
        let err = single_error(source, &Features::default());

        assert_eq!(
            concat!(
                "error[syntax]: expected `{`, found identifier `x`\n",
                "  --> 1:9\n",
                "  |\n",
                "1 | scene s x\n",
                "  |         ^",
            ),
            render(&err, &SourceMap::new(source, 0)),
        );
    }

    #[test]
    fn renders_annotations() {
        let source = "scene s {";
        let err = single_error(source, &Features::default());

        assert_eq!(
            concat!(
                "error[unexpected-eof]: unclosed scene `s`: expected `}`, found end of file\n",
                "  --> 1:10\n",
                "  |\n",
                "1 | scene s {\n",
                "  |          ^\n",
                "  --> 1:1\n",
                "  |\n",
                "1 | scene s {\n",
                "  | ----- scene opened here",
            ),
            render(&err, &SourceMap::new(source, 0)),
        );
    }

    #[test]
    fn renders_spans_over_later_lines() {
        let source = "scene s {\n  branch b {\n    \"oops\n}\n}";
        let err = single_error(source, &Features::default());

        assert_eq!(
            concat!(
                "error[syntax]: unterminated string literal\n",
                "  --> 3:5\n",
                "  |\n",
                "3 |     \"oops\n",
                "  |     ^^^^^",
            ),
            render(&err, &SourceMap::new(source, 0)),
        );
    }
}
