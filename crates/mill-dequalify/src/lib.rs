//! Replace fully qualified Java type references with imports
//!
//! The pipeline runs once per file and is purely line based:
//!
//! 1. [`header`] reads the package declaration and existing imports into a
//!    per-file [`SymbolTable`].
//! 2. [`scanner`] splits each code line into text, literals, and qualified
//!    names such as `java.util.List`.
//! 3. [`resolver`] decides, name by name, whether to shorten the reference
//!    and whether a new import is needed. The first type to claim a simple
//!    name in a file keeps it.
//! 4. [`rewriter`] applies the replacements and inserts the new imports
//!    after the last existing import.
//!
//! [`workspace`] drives the pipeline over whole source trees.
//!
//! ```
//! use mill_dequalify::{rewrite_source, ResolveOptions};
//!
//! let source = "package com.acme;\n\nclass A { com.acme.util.Box b; }\n";
//! let rewrite = rewrite_source(source, &ResolveOptions::default()).unwrap();
//! assert_eq!(
//!     rewrite.content,
//!     "package com.acme;\nimport com.acme.util.Box;\n\nclass A { Box b; }\n"
//! );
//! ```

pub mod constants;
pub mod error;
pub mod header;
pub mod resolver;
pub mod rewriter;
pub mod scanner;
pub mod symbols;
pub mod workspace;

pub use error::{DequalifyError, DequalifyResult};
pub use resolver::{resolve, Resolution, ResolveOptions};
pub use rewriter::{rewrite_source, Rewrite};
pub use symbols::SymbolTable;
pub use workspace::{
    collect_source_files, find_project_root, process_file, process_file_with, Dequalifier,
    FileOutcome, FsStore, RunSummary, SourceStore, WriteMode,
};
