//! In-memory rewriting of a Java source file
//!
//! Runs header parsing, scanning, and resolution over one file's text and
//! produces the new text with shortened references and a block of sorted
//! imports at the insertion point.

use crate::header::{is_header_line, parse_header};
use crate::resolver::{resolve, ResolveOptions};
use crate::scanner::{bare_type_names, is_comment_line, scan_line, Segment};
use tracing::debug;

/// Result of rewriting a file that changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Full new file content
    pub content: String,
    /// Imports added, sorted by full path
    pub new_imports: Vec<String>,
    /// Number of qualified names replaced by their simple name
    pub replacements: usize,
}

/// Rewrite `source`, returning `None` when nothing would change.
///
/// Every line keeps its own terminator; inserted imports take the terminator
/// of the line they follow.
pub fn rewrite_source(source: &str, options: &ResolveOptions) -> Option<Rewrite> {
    let lines = split_lines(source);
    let bodies: Vec<&str> = lines.iter().map(|(body, _)| *body).collect();

    let header = parse_header(&bodies);
    let insert_at = header.insert_at;
    let mut symbols = header.symbols;
    let mut replacements = 0;

    let is_code = |line: &str| !is_header_line(line) && !is_comment_line(line);
    if symbols.has_wildcards() {
        for line in bodies.iter().filter(|line| is_code(**line)) {
            for name in bare_type_names(line) {
                symbols.note_bare(name);
            }
        }
    }

    let mut output: Vec<(String, &str)> = Vec::with_capacity(lines.len() + 1);
    for &(line, ending) in &lines {
        if !is_code(line) {
            output.push((line.to_string(), ending));
            continue;
        }

        let mut rewritten = String::with_capacity(line.len());
        for segment in scan_line(line) {
            match segment {
                Segment::Qualified(name) => {
                    if resolve(options, &mut symbols, &name).shortens() {
                        rewritten.push_str(name.name);
                        replacements += 1;
                    } else {
                        rewritten.push_str(name.text);
                    }
                }
                other => rewritten.push_str(other.as_str()),
            }
        }
        output.push((rewritten, ending));
    }

    if replacements == 0 && symbols.staged_count() == 0 {
        return None;
    }

    let new_imports: Vec<String> = symbols
        .staged_imports()
        .into_iter()
        .map(str::to_string)
        .collect();

    debug!(
        replacements,
        new_imports = new_imports.len(),
        insert_at,
        "Rewrote source"
    );

    let ending = import_ending(&lines, insert_at);
    let mut block: Vec<(String, &str)> = new_imports
        .iter()
        .map(|fqn| (format_import(fqn), ending))
        .collect();
    // Inserting after an unterminated final line moves the missing terminator
    // to the end of the block.
    if let Some(previous) = insert_at.checked_sub(1).and_then(|i| output.get_mut(i)) {
        if previous.1.is_empty() {
            if let Some(last) = block.last_mut() {
                previous.1 = ending;
                last.1 = "";
            }
        }
    }
    output.splice(insert_at..insert_at, block);

    let mut content = String::with_capacity(source.len() + 32 * new_imports.len());
    for (line, ending) in &output {
        content.push_str(line);
        content.push_str(ending);
    }

    Some(Rewrite {
        content,
        new_imports,
        replacements,
    })
}

/// Split into `(body, terminator)` pairs. The terminator is `"\r\n"`, `"\n"`,
/// or empty for a final line without one.
fn split_lines(source: &str) -> Vec<(&str, &str)> {
    source
        .split_inclusive('\n')
        .map(|chunk| {
            if let Some(body) = chunk.strip_suffix("\r\n") {
                (body, "\r\n")
            } else if let Some(body) = chunk.strip_suffix('\n') {
                (body, "\n")
            } else {
                (chunk, "")
            }
        })
        .collect()
}

/// Terminator for inserted import lines: that of the preceding line, else the
/// first terminator in the file, else `\n`
fn import_ending<'a>(lines: &[(&'a str, &'a str)], insert_at: usize) -> &'a str {
    insert_at
        .checked_sub(1)
        .and_then(|i| lines.get(i))
        .map(|(_, ending)| *ending)
        .filter(|ending| !ending.is_empty())
        .or_else(|| {
            lines
                .iter()
                .map(|(_, ending)| *ending)
                .find(|ending| !ending.is_empty())
        })
        .unwrap_or("\n")
}

/// Format a single-type import declaration
pub fn format_import(qualified: &str) -> String {
    format!("import {};", qualified)
}
