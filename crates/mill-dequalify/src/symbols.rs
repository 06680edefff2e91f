//! Per-file symbol table
//!
//! A file is treated as one flat namespace of simple names. The table holds
//! what the file already declares (package, imports, wildcard packages) and
//! what the current run has decided to add (staged imports, and names
//! shortened on the strength of a wildcard import). It is built fresh for
//! every file and dropped afterwards.

use std::collections::{HashMap, HashSet};

/// Simple-name bindings for a single source file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    package: Option<String>,
    imports: HashMap<String, String>,
    wildcards: HashSet<String>,
    staged: HashMap<String, String>,
    /// Names shortened under a wildcard import, with no import line of their own
    covered: HashMap<String, String>,
    /// Capitalized names the file already uses without qualification
    bare: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package declared by the file, if any
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Set the declared package. Only the first declaration counts.
    pub fn declare_package(&mut self, package: impl Into<String>) {
        if self.package.is_none() {
            self.package = Some(package.into());
        }
    }

    /// Register an existing single-type import under its simple name
    pub fn add_import(&mut self, simple_name: impl Into<String>, qualified: impl Into<String>) {
        self.imports.insert(simple_name.into(), qualified.into());
    }

    /// Register an existing on-demand (`pkg.*`) import
    pub fn add_wildcard(&mut self, package: impl Into<String>) {
        self.wildcards.insert(package.into());
    }

    /// Qualified name an existing import binds to `simple_name`
    pub fn imported(&self, simple_name: &str) -> Option<&str> {
        self.imports.get(simple_name).map(String::as_str)
    }

    /// Whether `package` is covered by an existing wildcard import
    pub fn has_wildcard(&self, package: &str) -> bool {
        self.wildcards.contains(package)
    }

    /// The wildcard package, when the file has exactly one.
    ///
    /// With two or more on-demand imports a simple name may be exported by
    /// several of them, so none of them can vouch for it alone.
    pub fn sole_wildcard(&self) -> Option<&str> {
        match self.wildcards.len() {
            1 => self.wildcards.iter().next().map(String::as_str),
            _ => None,
        }
    }

    /// Whether the file has any on-demand import
    pub fn has_wildcards(&self) -> bool {
        !self.wildcards.is_empty()
    }

    /// Record a simple name the file uses without qualification
    pub fn note_bare(&mut self, simple_name: &str) {
        if !self.bare.contains(simple_name) {
            self.bare.insert(simple_name.to_string());
        }
    }

    /// Whether the file uses `simple_name` without qualification
    pub fn is_used_bare(&self, simple_name: &str) -> bool {
        self.bare.contains(simple_name)
    }

    /// Qualified name staged in this run under `simple_name`
    pub fn staged(&self, simple_name: &str) -> Option<&str> {
        self.staged.get(simple_name).map(String::as_str)
    }

    /// Qualified name that claimed `simple_name` earlier in this run, either
    /// through a staged import or through wildcard coverage
    pub fn claimed(&self, simple_name: &str) -> Option<&str> {
        self.staged
            .get(simple_name)
            .or_else(|| self.covered.get(simple_name))
            .map(String::as_str)
    }

    /// Stage a new import. Returns false if the simple name is already taken.
    pub fn stage(&mut self, simple_name: &str, qualified: &str) -> bool {
        if self.is_taken(simple_name) {
            return false;
        }
        self.staged
            .insert(simple_name.to_string(), qualified.to_string());
        true
    }

    /// Claim a simple name for a wildcard-imported type without adding an
    /// import line. Returns false if the simple name is already taken.
    pub fn cover(&mut self, simple_name: &str, qualified: &str) -> bool {
        if self.is_taken(simple_name) {
            return false;
        }
        self.covered
            .insert(simple_name.to_string(), qualified.to_string());
        true
    }

    fn is_taken(&self, simple_name: &str) -> bool {
        self.imports.contains_key(simple_name)
            || self.staged.contains_key(simple_name)
            || self.covered.contains_key(simple_name)
    }

    /// Number of existing single-type imports
    pub fn import_count(&self) -> usize {
        self.imports.len()
    }

    /// Number of imports staged in this run
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Staged qualified names, sorted by full path
    pub fn staged_imports(&self) -> Vec<&str> {
        let mut imports: Vec<&str> = self.staged.values().map(String::as_str).collect();
        imports.sort_unstable();
        imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_package_declaration_wins() {
        let mut table = SymbolTable::new();
        table.declare_package("com.acme");
        table.declare_package("com.other");
        assert_eq!(table.package(), Some("com.acme"));
    }

    #[test]
    fn test_stage_once_per_simple_name() {
        let mut table = SymbolTable::new();
        assert!(table.stage("Box", "com.acme.util.Box"));
        assert!(!table.stage("Box", "com.other.util.Box"));
        assert_eq!(table.staged("Box"), Some("com.acme.util.Box"));
        assert_eq!(table.staged_count(), 1);
    }

    #[test]
    fn test_stage_refuses_imported_name() {
        let mut table = SymbolTable::new();
        table.add_import("List", "java.util.List");
        assert!(!table.stage("List", "com.acme.List"));
        assert_eq!(table.staged_count(), 0);
    }

    #[test]
    fn test_staged_imports_sorted_by_full_path() {
        let mut table = SymbolTable::new();
        table.stage("Zeta", "com.acme.Zeta");
        table.stage("Alpha", "org.other.Alpha");
        table.stage("Mid", "com.acme.inner.Mid");
        assert_eq!(
            table.staged_imports(),
            vec!["com.acme.Zeta", "com.acme.inner.Mid", "org.other.Alpha"]
        );
    }

    #[test]
    fn test_wildcards_are_separate_from_imports() {
        let mut table = SymbolTable::new();
        table.add_wildcard("java.util");
        assert!(table.has_wildcard("java.util"));
        assert!(!table.has_wildcard("java.util.concurrent"));
        assert_eq!(table.import_count(), 0);
    }

    #[test]
    fn test_sole_wildcard() {
        let mut table = SymbolTable::new();
        assert_eq!(table.sole_wildcard(), None);
        table.add_wildcard("java.util");
        assert_eq!(table.sole_wildcard(), Some("java.util"));
        table.add_wildcard("java.awt");
        assert_eq!(table.sole_wildcard(), None);
        assert!(table.has_wildcards());
    }

    #[test]
    fn test_bare_names() {
        let mut table = SymbolTable::new();
        table.note_bare("List");
        table.note_bare("List");
        assert!(table.is_used_bare("List"));
        assert!(!table.is_used_bare("Map"));
    }

    #[test]
    fn test_covered_name_blocks_staging() {
        let mut table = SymbolTable::new();
        assert!(table.cover("List", "java.util.List"));
        assert!(!table.stage("List", "com.acme.List"));
        assert_eq!(table.claimed("List"), Some("java.util.List"));
        assert_eq!(table.staged_count(), 0);
        assert!(table.staged_imports().is_empty());
    }

    #[test]
    fn test_staged_name_blocks_cover() {
        let mut table = SymbolTable::new();
        assert!(table.stage("List", "com.acme.List"));
        assert!(!table.cover("List", "java.util.List"));
        assert_eq!(table.claimed("List"), Some("com.acme.List"));
    }
}
