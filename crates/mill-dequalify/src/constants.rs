//! Constants and regex patterns for Java qualified-name rewriting
//!
//! Keywords, defaults, and the line scanning pattern live here so the
//! header parser, scanner, and driver agree on them.

use once_cell::sync::Lazy;
use regex::Regex;

// === Language Constants ===

/// Keyword opening a package declaration
pub const PACKAGE_KEYWORD: &str = "package";

/// Keyword opening an import declaration
pub const IMPORT_KEYWORD: &str = "import";

/// Qualifier for static imports (`import static a.b.C.member;`)
pub const STATIC_QUALIFIER: &str = "static";

/// Line comment marker
pub const LINE_COMMENT: &str = "//";

/// Package whose types never need an explicit import
pub const DEFAULT_BUILTIN_PACKAGE: &str = "java.lang";

/// Source file suffix, without the dot
pub const JAVA_EXTENSION: &str = "java";

// === Driver Defaults ===

/// Directory names that mark a project root
pub const ROOT_MARKERS: &[&str] = &[".git"];

// === Regex Patterns ===

/// Pattern for one scannable unit of a code line
///
/// Alternatives, tried leftmost-first:
/// - `lit`: a `"..."` string or `'.'` char literal, backslash escapes honoured
/// - `fqn`: `pkg.seg.Type`, with `pkg` holding the dotted lowercase-led
///   segments and `name` the trailing capitalized segment
///
/// Identifier boundaries are checked by the scanner, since the regex crate
/// has no lookbehind.
pub static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<lit>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)')|(?P<fqn>(?P<pkg>[a-z0-9_][A-Za-z0-9_]*(?:\.[a-z0-9_][A-Za-z0-9_]*)*)\.(?P<name>[A-Z][A-Za-z0-9_]*))"#,
    )
    .expect("Valid token pattern regex")
});

/// Characters that continue a Java identifier
pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
