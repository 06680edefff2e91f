//! Package and import header parsing
//!
//! Reads the `package` and `import` lines of a Java file into a
//! [`SymbolTable`] and works out where new imports should be inserted.

use crate::constants::{
    is_identifier_char, IMPORT_KEYWORD, LINE_COMMENT, PACKAGE_KEYWORD, STATIC_QUALIFIER,
};
use crate::symbols::SymbolTable;
use tracing::trace;

/// Result of reading a file's header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Declared package, imports, and wildcard packages
    pub symbols: SymbolTable,
    /// Line index where staged imports are inserted
    pub insert_at: usize,
}

/// Parse the package declaration and imports of `lines`.
///
/// The insertion point is the line after the last import, or the line after
/// the package declaration when there are no imports, or 0.
pub fn parse_header<S: AsRef<str>>(lines: &[S]) -> Header {
    let mut symbols = SymbolTable::new();
    let mut package_line = None;
    let mut last_import_line = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.as_ref().trim();

        if let Some(rest) = strip_keyword(trimmed, PACKAGE_KEYWORD) {
            if package_line.is_none() {
                if let Some(package) = parse_package(rest) {
                    trace!(line = idx, package = %package, "Found package declaration");
                    symbols.declare_package(package);
                    package_line = Some(idx);
                }
            }
        } else if let Some(rest) = strip_keyword(trimmed, IMPORT_KEYWORD) {
            last_import_line = Some(idx);
            register_import(&mut symbols, rest);
        }
    }

    let insert_at = match (last_import_line, package_line) {
        (Some(line), _) => line + 1,
        (None, Some(line)) => line + 1,
        (None, None) => 0,
    };

    Header { symbols, insert_at }
}

/// Whether a line is a package or import declaration.
///
/// Such lines are never scanned for qualified names.
pub fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim();
    strip_keyword(trimmed, PACKAGE_KEYWORD).is_some()
        || strip_keyword(trimmed, IMPORT_KEYWORD).is_some()
}

/// Strip `keyword` from the start of `text` if it is followed by whitespace
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Drop a trailing `// ...` comment and the `;` terminator
fn statement_body(text: &str) -> &str {
    let text = match text.find(LINE_COMMENT) {
        Some(pos) => &text[..pos],
        None => text,
    };
    let text = text.trim();
    text.strip_suffix(';').unwrap_or(text).trim()
}

fn parse_package(rest: &str) -> Option<String> {
    let package = statement_body(rest);
    if package.is_empty() {
        None
    } else {
        Some(package.to_string())
    }
}

fn register_import(symbols: &mut SymbolTable, rest: &str) {
    let (is_static, path) = match strip_keyword(rest, STATIC_QUALIFIER) {
        Some(path) => (true, path),
        None => (false, rest),
    };
    let path = statement_body(path);

    if let Some(package) = path.strip_suffix(".*") {
        // Static on-demand imports bring in members, not types
        if !is_static && !package.is_empty() {
            symbols.add_wildcard(package);
        }
        return;
    }

    // `import Foo;` binds `Foo` to itself
    let simple_name = path.rsplit_once('.').map_or(path, |(_, name)| name);
    if simple_name.is_empty() || !simple_name.chars().all(is_identifier_char) {
        trace!(import = %path, "Ignoring malformed import");
        return;
    }

    symbols.add_import(simple_name, path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<&str> {
        source.lines().collect()
    }

    #[test]
    fn test_package_and_imports() {
        let source = "package com.example;\n\nimport java.util.List;\nimport java.io.File;\n\npublic class A {}";
        let header = parse_header(&lines(source));
        assert_eq!(header.symbols.package(), Some("com.example"));
        assert_eq!(header.symbols.imported("List"), Some("java.util.List"));
        assert_eq!(header.symbols.imported("File"), Some("java.io.File"));
        assert_eq!(header.insert_at, 4);
    }

    #[test]
    fn test_package_with_trailing_comment() {
        let header = parse_header(&["package com.acme; // main package"]);
        assert_eq!(header.symbols.package(), Some("com.acme"));
        assert_eq!(header.insert_at, 1);
    }

    #[test]
    fn test_first_package_line_wins() {
        let header = parse_header(&["package com.acme;", "package com.other;"]);
        assert_eq!(header.symbols.package(), Some("com.acme"));
        assert_eq!(header.insert_at, 1);
    }

    #[test]
    fn test_static_import_registers_member_name() {
        let header = parse_header(&["import static org.junit.Assert.assertEquals;"]);
        assert_eq!(
            header.symbols.imported("assertEquals"),
            Some("org.junit.Assert.assertEquals")
        );
    }

    #[test]
    fn test_wildcard_imports_not_in_table() {
        let header = parse_header(&[
            "import java.util.*;",
            "import static org.junit.Assert.*;",
        ]);
        assert_eq!(header.symbols.import_count(), 0);
        assert!(header.symbols.has_wildcard("java.util"));
        assert!(!header.symbols.has_wildcard("org.junit.Assert"));
        assert_eq!(header.insert_at, 2);
    }

    #[test]
    fn test_malformed_import_still_moves_insertion_point() {
        let header = parse_header(&["package a;", "import ;", "import a.b.;", "class X {}"]);
        assert_eq!(header.symbols.import_count(), 0);
        assert_eq!(header.insert_at, 3);
    }

    #[test]
    fn test_single_segment_import_is_registered() {
        let header = parse_header(&["import Foo;", "class X {}"]);
        assert_eq!(header.symbols.imported("Foo"), Some("Foo"));
        assert_eq!(header.insert_at, 1);
    }

    #[test]
    fn test_insert_after_package_without_imports() {
        let header = parse_header(&["// license", "package com.acme;", "", "class A {}"]);
        assert_eq!(header.insert_at, 2);
    }

    #[test]
    fn test_insert_at_top_without_header() {
        let header = parse_header(&["class A {}"]);
        assert_eq!(header.symbols.package(), None);
        assert_eq!(header.insert_at, 0);
    }

    #[test]
    fn test_keyword_needs_whitespace() {
        let header = parse_header(&["importantValue = 1;", "packages.add(x);"]);
        assert_eq!(header.symbols.package(), None);
        assert_eq!(header.insert_at, 0);
    }

    #[test]
    fn test_is_header_line() {
        assert!(is_header_line("  import java.util.List;"));
        assert!(is_header_line("package com.acme;"));
        assert!(!is_header_line("java.util.List x;"));
        assert!(!is_header_line("imports.add(1);"));
    }
}
