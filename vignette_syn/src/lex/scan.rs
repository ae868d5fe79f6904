use crate::read::Reader;
use crate::token::{Keyword, Kind, Token};
use crate::Span;

use super::{is_horizontal_whitespace, is_whitespace, Error, ErrorKind};

/// Scans one token from `reader`, skipping leading whitespace. Returns `Ok(None)` at
/// the end of the source.
pub(super) fn scan_token(
    reader: &mut Reader<'_>,
    collapse_string_whitespace: bool,
) -> Result<Option<Token>, Error> {
    reader.skip_while(is_whitespace);

    let start = reader.pos();
    let first = match reader.first() {
        Some(c) => c,
        None => return Ok(None),
    };

    let scanned = match first {
        '#' => scan_comment(reader).map(|text| (Kind::Comment, text)),
        '"' => scan_str(reader, collapse_string_whitespace).map(|text| (Kind::Str, text)),
        '{' => reader
            .read(1)
            .map(|brace| (Kind::OpenBrace, brace.to_owned()))
            .map_err(ErrorKind::from),
        '}' => reader
            .read(1)
            .map(|brace| (Kind::CloseBrace, brace.to_owned()))
            .map_err(ErrorKind::from),
        _ => scan_word(reader).map(|word| {
            let kind = Keyword::identify(&word).map_or(Kind::Ident, Kind::Keyword);
            (kind, word)
        }),
    };

    let span = Span::new(start, reader.pos() - start);
    match scanned {
        Ok((kind, value)) => Ok(Some(Token::new(kind, value, span))),
        Err(kind) => Err(Error { kind, span }),
    }
}

/// `#`, then the rest of the line without leading spaces or tabs.
fn scan_comment(reader: &mut Reader<'_>) -> Result<String, ErrorKind> {
    reader.read(1)?;
    reader.skip_while(is_horizontal_whitespace);

    let len = reader.count_while(|c| c != '\r' && c != '\n');
    Ok(reader.read(len)?.to_owned())
}

fn scan_word(reader: &mut Reader<'_>) -> Result<String, ErrorKind> {
    let len = reader.count_while(|c| !is_whitespace(c));
    Ok(reader.read(len)?.to_owned())
}

/// A double-quoted literal. `\` takes the next character verbatim, bare `\r`s are
/// dropped.
fn scan_str(reader: &mut Reader<'_>, collapse_whitespace: bool) -> Result<String, ErrorKind> {
    reader.read(1)?;

    let mut value = String::new();
    loop {
        let c = reader.bump().ok_or(ErrorKind::UnterminatedStr)?;
        match c {
            '"' => return Ok(value),
            '\\' => {
                let escaped = reader.bump().ok_or(ErrorKind::UnterminatedStr)?;
                value.push(escaped);
            }
            '\r' => {}
            '\n' | ' ' => {
                value.push(c);
                if collapse_whitespace {
                    reader.skip_while(is_horizontal_whitespace);
                }
            }
            _ => value.push(c),
        }
    }
}
