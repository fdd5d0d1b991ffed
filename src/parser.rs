use std::io::BufRead;
use std::path::Path;

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::model::{Entry, MalformedLineMode};

/// Parse environment entries from UTF-8 text.
pub fn parse_str(input: &str) -> Result<Vec<Entry>, Error> {
    parse_str_with_mode(input, MalformedLineMode::Reject)
}

/// Parse environment entries from UTF-8 text using a specific malformed-line mode.
pub fn parse_str_with_mode(input: &str, mode: MalformedLineMode) -> Result<Vec<Entry>, Error> {
    let (entries, _) = parse_str_with_source(input, None, mode)?;
    Ok(entries)
}

/// Parse environment entries from UTF-8 bytes.
pub fn parse_bytes(input: &[u8]) -> Result<Vec<Entry>, Error> {
    parse_bytes_with_mode(input, MalformedLineMode::Reject)
}

/// Parse environment entries from UTF-8 bytes using a specific malformed-line mode.
pub fn parse_bytes_with_mode(input: &[u8], mode: MalformedLineMode) -> Result<Vec<Entry>, Error> {
    let text = std::str::from_utf8(input)?;
    parse_str_with_mode(text, mode)
}

/// Parse environment entries from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Entry>, Error> {
    parse_reader_with_mode(reader, MalformedLineMode::Reject)
}

/// Parse environment entries from a buffered reader using a specific malformed-line mode.
pub fn parse_reader_with_mode<R: BufRead>(
    mut reader: R,
    mode: MalformedLineMode,
) -> Result<Vec<Entry>, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::Read)?;
    parse_bytes_with_mode(&buf, mode)
}

/// Parses every line, returning the entries in file order together with the
/// number of malformed lines that were skipped.
pub(crate) fn parse_str_with_source(
    input: &str,
    source: Option<&Path>,
    mode: MalformedLineMode,
) -> Result<(Vec<Entry>, usize), ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw_line) in input.split('\n').enumerate() {
        let line_num = idx as u32 + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        match parse_line(line, line_num, source) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(err) if mode == MalformedLineMode::Skip => {
                tracing::warn!(
                    line = err.line,
                    kind = %err.kind,
                    source = ?source,
                    "skipping malformed line"
                );
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok((entries, skipped))
}

fn parse_line(
    line: &str,
    line_num: u32,
    source: Option<&Path>,
) -> Result<Option<Entry>, ParseError> {
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }

    let Some((raw_key, raw_value)) = line.split_once('=') else {
        let column = line.chars().count() as u32 + 1;
        return Err(ParseError::new(
            line_num,
            column,
            ParseErrorKind::InvalidSyntax,
        ));
    };

    let key = raw_key.trim();
    if key.is_empty() {
        return Err(ParseError::new(line_num, 1, ParseErrorKind::MissingKey));
    }
    if let Some(offset) = line.find('\0') {
        let column = line[..offset].chars().count() as u32 + 1;
        return Err(ParseError::new(line_num, column, ParseErrorKind::NulByte));
    }

    Ok(Some(Entry {
        key: key.to_owned(),
        value: unquote(raw_value.trim()),
        source: source.map(Path::to_path_buf),
        line: line_num,
    }))
}

/// Strips one pair of surrounding double quotes and unescapes `\"`.
///
/// The opening and closing quote must be distinct characters, so a lone `"`
/// is kept verbatim. Unquoted values are never unescaped.
fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        None => value.to_owned(),
    }
}
