//! iCalendar document parser (RFC 5545).
//!
//! Builds the component tree from unfolded content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use crate::ical::{Component, ComponentKind, ICalendar};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not valid iCalendar.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = split_lines(input);

    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    let mut stack: Vec<Component> = Vec::new();
    let mut root: Option<Component> = None;
    let mut last_line_num = 1;

    for (line_num, line) in lines {
        last_line_num = line_num;
        let prop = parse_content_line(&line, line_num)?;

        match prop.name.as_str() {
            "BEGIN" => {
                if stack.is_empty() && root.is_some() {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context("content after the closing END"),
                    );
                }
                stack.push(Component::custom(prop.raw_value));
            }
            "END" => {
                let Some(done) = stack.pop() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context("END without a matching BEGIN"));
                };
                let end_name = prop.raw_value.to_ascii_uppercase();
                if end_name != done.name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{}, got END:{end_name}",
                                done.name
                            )),
                    );
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(done);
                } else {
                    root = Some(done);
                }
            }
            _ => {
                let Some(current) = stack.last_mut() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context("property outside any component"));
                };
                current.properties.push(prop);
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(
            ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                .with_context(format!("missing END:{}", open.name)),
        );
    }

    let root = root.ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;

    if root.kind != Some(ComponentKind::Calendar) {
        tracing::warn!(name = %root.name, "Root component is not VCALENDAR");
        return Err(
            ParseError::new(ParseErrorKind::MissingBegin, 1, 1).with_context("expected VCALENDAR"),
        );
    }

    tracing::debug!(components = root.children.len(), "iCalendar document parsed");

    Ok(ICalendar { root })
}
