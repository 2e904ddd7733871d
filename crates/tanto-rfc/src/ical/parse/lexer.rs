//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::{Parameter, Property};

/// Splits input into content lines, merging folded continuations.
///
/// Per RFC 5545 §3.1, a line is folded by inserting CRLF followed by a
/// single SPACE or HTAB; unfolding removes the line break and that one
/// whitespace character. Bare LF line endings are accepted leniently.
/// Returned tuples carry the 1-based number of the line each content
/// line started on.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single unfolded content line into a property.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<Property> {
    let mut name_end = None;
    for (i, c) in line.char_indices() {
        match c {
            ';' | ':' => {
                name_end = Some(i);
                break;
            }
            c if c.is_ascii_alphanumeric() || c == '-' => {}
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidPropertyName,
                    line_num,
                    i + 1,
                ));
            }
        }
    }

    let name_end = name_end.ok_or_else(|| {
        ParseError::new(ParseErrorKind::MissingColon, line_num, line.len().max(1))
    })?;
    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = &line[..name_end];
    let mut params = Vec::new();
    let mut rest = &line[name_end..];

    while let Some(tail) = rest.strip_prefix(';') {
        let (param, remainder) = parse_parameter(line, tail, line_num)?;
        params.push(param);
        rest = remainder;
    }

    let value = rest.strip_prefix(':').ok_or_else(|| {
        ParseError::new(ParseErrorKind::MissingColon, line_num, line.len().max(1))
    })?;

    Ok(Property::with_params(name, params, value))
}

/// Parses one parameter starting just after its leading `;`.
///
/// Returns the parameter and the remainder of the line, which begins with
/// the `;` of the next parameter or the `:` before the value.
fn parse_parameter<'a>(
    line: &str,
    input: &'a str,
    line_num: usize,
) -> ParseResult<(Parameter, &'a str)> {
    let column = |rest: &str, i: usize| line.len() - rest.len() + i + 1;

    // Parameter name (up to '=')
    let mut name_end = None;
    for (i, c) in input.char_indices() {
        match c {
            '=' => {
                name_end = Some(i);
                break;
            }
            c if c.is_ascii_alphanumeric() || c == '-' => {}
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidParameter,
                    line_num,
                    column(input, i),
                ));
            }
        }
    }
    let name_end = name_end.ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidParameter, line_num, column(input, 0))
    })?;
    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            column(input, 0),
        ));
    }

    let name = &input[..name_end];
    let mut rest = &input[name_end + 1..];

    // Parameter values (comma-separated, possibly quoted)
    let mut values = Vec::new();
    loop {
        let (value, after) = parse_param_value(line, rest, line_num)?;
        values.push(value);

        match after.chars().next() {
            Some(',') => rest = &after[1..],
            Some(';' | ':') => return Ok((Parameter::with_values(name, values), after)),
            Some(c) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, column(after, 0))
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted), returning the remainder.
fn parse_param_value<'a>(
    line: &str,
    input: &'a str,
    line_num: usize,
) -> ParseResult<(String, &'a str)> {
    if let Some(quoted) = input.strip_prefix('"') {
        let mut value = String::new();
        let mut chars = quoted.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => return Ok((value, &quoted[i + 1..])),
                // Caret encoding (RFC 6868)
                '^' => match chars.peek().map(|&(_, next)| next) {
                    Some('^') => {
                        value.push('^');
                        chars.next();
                    }
                    Some('n') => {
                        value.push('\n');
                        chars.next();
                    }
                    Some('\'') => {
                        value.push('"');
                        chars.next();
                    }
                    // Invalid caret escape, preserve as-is
                    _ => value.push('^'),
                },
                _ => value.push(c),
            }
        }

        Err(ParseError::new(
            ParseErrorKind::UnclosedQuote,
            line_num,
            line.len() - input.len() + 1,
        ))
    } else {
        let end = input.find([',', ';', ':']).unwrap_or(input.len());
        Ok((input[..end].to_string(), &input[end..]))
    }
}
