//! Replacement resolution for qualified names
//!
//! Each qualified name found by the scanner is resolved, in file order,
//! against the file's [`SymbolTable`]. The first qualified name to claim a
//! simple name in a run keeps it, whether it claimed the name by staging an
//! import or by leaning on the file's only wildcard import; later claimants
//! with a different origin are left fully qualified. Decisions are never
//! revisited.

use crate::constants::DEFAULT_BUILTIN_PACKAGE;
use crate::scanner::QualifiedName;
use crate::symbols::SymbolTable;
use tracing::trace;

/// Knobs for resolution that vary between projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Packages whose types are always in scope (`java.lang`)
    pub builtin_packages: Vec<String>,
    /// Simple names that are always shortened and never imported
    pub exempt_names: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            builtin_packages: vec![DEFAULT_BUILTIN_PACKAGE.to_string()],
            exempt_names: Vec::new(),
        }
    }
}

impl ResolveOptions {
    fn is_builtin(&self, package: &str) -> bool {
        self.builtin_packages.iter().any(|p| p == package)
    }

    fn is_exempt(&self, name: &str) -> bool {
        self.exempt_names.iter().any(|n| n == name)
    }
}

/// Outcome of resolving one qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Name is on the exemption allow-list
    Exempt,
    /// Type lives in a built-in package
    BuiltIn,
    /// Type lives in the file's own package
    SamePackage,
    /// Package is the file's only on-demand import (`pkg.*`); the simple
    /// name is claimed without adding an import line
    WildcardCovered,
    /// An existing import already binds this exact type
    AlreadyImported,
    /// An import for this exact type was staged earlier in the run
    AlreadyStaged,
    /// A new import was staged for this type
    Staged,
    /// An existing import binds the simple name to another type
    ShadowConflict { existing: String },
    /// Another type claimed the simple name earlier in the run, by staging
    /// or by wildcard coverage
    PendingConflict { staged: String },
    /// The simple name already appears unqualified in a file with wildcard
    /// imports, where it may be bound through one of them
    BareNameConflict,
}

impl Resolution {
    /// Whether the token is replaced by its simple name
    pub fn shortens(&self) -> bool {
        !matches!(
            self,
            Resolution::ShadowConflict { .. }
                | Resolution::PendingConflict { .. }
                | Resolution::BareNameConflict
        )
    }

    /// Whether this decision added a new import
    pub fn stages_import(&self) -> bool {
        matches!(self, Resolution::Staged)
    }
}

/// Decide what to do with `candidate`, staging an import when needed.
pub fn resolve(
    options: &ResolveOptions,
    symbols: &mut SymbolTable,
    candidate: &QualifiedName<'_>,
) -> Resolution {
    let QualifiedName { package, name, .. } = *candidate;

    let resolution = if options.is_exempt(name) {
        Resolution::Exempt
    } else if options.is_builtin(package) {
        Resolution::BuiltIn
    } else if symbols.package() == Some(package) {
        Resolution::SamePackage
    } else if let Some(existing) = symbols.imported(name) {
        if is_same_type(existing, package, name) {
            Resolution::AlreadyImported
        } else {
            Resolution::ShadowConflict {
                existing: existing.to_string(),
            }
        }
    } else if let Some(claimed) = symbols.claimed(name) {
        if !is_same_type(claimed, package, name) {
            Resolution::PendingConflict {
                staged: claimed.to_string(),
            }
        } else if symbols.staged(name).is_some() {
            Resolution::AlreadyStaged
        } else {
            Resolution::WildcardCovered
        }
    } else if symbols.sole_wildcard() == Some(package) {
        symbols.cover(name, &format!("{}.{}", package, name));
        Resolution::WildcardCovered
    } else if symbols.has_wildcards() && symbols.is_used_bare(name) {
        Resolution::BareNameConflict
    } else {
        symbols.stage(name, &format!("{}.{}", package, name));
        Resolution::Staged
    };

    trace!(
        qualified = %candidate.text,
        resolution = ?resolution,
        "Resolved qualified name"
    );
    resolution
}

/// `qualified == package + "." + name`, without allocating
fn is_same_type(qualified: &str, package: &str, name: &str) -> bool {
    qualified.len() == package.len() + 1 + name.len()
        && qualified.starts_with(package)
        && qualified[package.len()..].starts_with('.')
        && qualified.ends_with(name)
}
