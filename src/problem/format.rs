use owo_colors::OwoColorize;
use std::path::Path;

use super::messages::generate_error_message;
use crate::formatting::Render;
use crate::language::LoadingError;
use crate::parsing::ParsingError;

/// Format a parsing error with full details including source code context
pub fn full_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, details) = generate_error_message(error, renderer);

    let offset = match error.offset() {
        Some(offset) => offset,
        None => {
            return format!(
                "{}: {} {}\n\n{}",
                "error".bright_red(),
                filename.to_string_lossy(),
                problem.bold(),
                details
            );
        }
    };

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source_line(source, i);
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, _) = generate_error_message(error, renderer);

    match error.offset() {
        Some(offset) => {
            let line = calculate_line_number(source, offset) + 1;
            let column = calculate_column_number(source, offset) + 1;

            format!(
                "{}: {}:{}:{} {}",
                "error".bright_red(),
                filename.to_string_lossy(),
                line,
                column,
                problem.bold(),
            )
        }
        None => format!(
            "{}: {} {}",
            "error".bright_red(),
            filename.to_string_lossy(),
            problem.bold(),
        ),
    }
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

// Byte offsets just past each line break. The scanner ends a line at CR as
// well as LF, so a lone CR counts; CRLF counts once.
fn line_breaks(content: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = content.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter_map(move |(i, &b)| match b {
            b'\n' => Some(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => Some(i + 1),
            _ => None,
        })
}

// This returns a zero-origin result so that it can subsequently be used for
// finding the line; for display to humans you'll have to add 1.
fn calculate_line_number(content: &str, offset: usize) -> usize {
    line_breaks(content)
        .take_while(|&end| end <= offset)
        .count()
}

// Zero-origin as well, counted in characters rather than bytes.
fn calculate_column_number(content: &str, offset: usize) -> usize {
    let start = line_breaks(content)
        .take_while(|&end| end <= offset)
        .last()
        .unwrap_or(0);
    content[start..offset]
        .chars()
        .count()
}

// The text of zero-origin line i, without its line break.
fn source_line(content: &str, i: usize) -> &str {
    let start = if i == 0 {
        0
    } else {
        match line_breaks(content).nth(i - 1) {
            Some(start) => start,
            None => return "",
        }
    };
    let rest = &content[start..];
    let end = rest
        .find(['\r', '\n'])
        .unwrap_or(rest.len());
    &rest[..end]
}
