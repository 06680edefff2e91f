//! Qualified-name scanner for Java code lines
//!
//! Splits a line into plain text, opaque literals, and fully qualified type
//! references such as `java.util.List`. Literal contents are never inspected
//! for qualified names.

use crate::constants::{is_identifier_char, TOKEN_PATTERN};

/// One piece of a scanned line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text with no recognized token
    Text(&'a str),
    /// A string or char literal, passed through untouched
    Literal(&'a str),
    /// A fully qualified type reference
    Qualified(QualifiedName<'a>),
}

/// A `package.Type` reference found in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// Full matched text, e.g. `java.util.List`
    pub text: &'a str,
    /// Dotted package prefix, e.g. `java.util`
    pub package: &'a str,
    /// Trailing simple name, e.g. `List`
    pub name: &'a str,
}

/// Check if a line is a comment line
///
/// Comment lines are passed through verbatim, so qualified names inside
/// documentation blocks are never rewritten. A line opening with a block
/// comment only counts when nothing but whitespace follows the comment.
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("/*") {
        return match rest.find("*/") {
            Some(end) => rest[end + 2..].trim().is_empty(),
            None => true,
        };
    }
    trimmed.starts_with("//") || trimmed.starts_with('*')
}

/// Scan a code line left to right into non-overlapping segments.
///
/// Concatenating the text of every returned segment reproduces `line`.
pub fn scan_line(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in TOKEN_PATTERN.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let segment = if caps.name("lit").is_some() {
            Segment::Literal(whole.as_str())
        } else {
            match (caps.name("pkg"), caps.name("name")) {
                (Some(package), Some(name))
                    if is_bounded(line, whole.start(), whole.end()) =>
                {
                    Segment::Qualified(QualifiedName {
                        text: whole.as_str(),
                        package: package.as_str(),
                        name: name.as_str(),
                    })
                }
                // Part of a longer identifier or member chain
                _ => continue,
            }
        };

        if whole.start() > last {
            segments.push(Segment::Text(&line[last..whole.start()]));
        }
        segments.push(segment);
        last = whole.end();
    }

    if last < line.len() {
        segments.push(Segment::Text(&line[last..]));
    }

    segments
}

/// Qualified names found in a line, in order
pub fn qualified_names(line: &str) -> Vec<QualifiedName<'_>> {
    scan_line(line)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Qualified(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Capitalized identifiers used without qualification, e.g. `List` and
/// `Foo` in `List<String> xs = Foo.of();`
///
/// Literals, qualified names, and member accesses (`x.Type`) are skipped.
pub fn bare_type_names(line: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for segment in scan_line(line) {
        let Segment::Text(text) = segment else {
            continue;
        };

        let mut run_start = None;
        let mut after_dot = false;
        let mut previous_dot = false;
        for (index, ch) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            if is_identifier_char(ch) {
                if run_start.is_none() {
                    run_start = Some(index);
                    after_dot = previous_dot;
                }
            } else if let Some(start) = run_start.take() {
                let word = &text[start..index];
                if !after_dot && word.starts_with(|c: char| c.is_ascii_uppercase()) {
                    names.push(word);
                }
            }
            previous_dot = ch == '.';
        }
    }
    names
}

/// A token must not continue an identifier on either side, and must not be
/// the tail of a member access like `obj.field.Type`.
fn is_bounded(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();

    let clean_before = before.map_or(true, |ch| !is_identifier_char(ch) && ch != '.');
    let clean_after = after.map_or(true, |ch| !is_identifier_char(ch));
    clean_before && clean_after
}

impl Segment<'_> {
    /// Source text covered by this segment
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Literal(text) => text,
            Segment::Qualified(name) => name.text,
        }
    }
}
