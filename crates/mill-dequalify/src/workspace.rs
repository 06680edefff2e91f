//! Project discovery and batch processing
//!
//! Finds the project root, walks source trees for `.java` files, and runs
//! the rewrite pipeline on each file inside its own failure boundary: an
//! unreadable or unwritable file is logged and counted, and the run goes on.

use crate::constants::JAVA_EXTENSION;
use crate::error::{DequalifyError, DequalifyResult};
use crate::resolver::ResolveOptions;
use crate::rewriter::rewrite_source;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Find the project root by walking up from `start` until a directory
/// containing one of `markers` is found. Falls back to `start`.
pub fn find_project_root<S: AsRef<str>>(start: &Path, markers: &[S]) -> PathBuf {
    let mut current = Some(start);
    while let Some(dir) = current {
        if markers.iter().any(|marker| dir.join(marker.as_ref()).exists()) {
            return dir.to_path_buf();
        }
        current = dir.parent();
    }

    debug!(start = %start.display(), "No project root marker found, using start directory");
    start.to_path_buf()
}

/// Collect every file with `extension` under `tree`, in sorted order
pub fn collect_source_files(tree: &Path, extension: &str) -> DequalifyResult<Vec<PathBuf>> {
    if !tree.is_dir() {
        return Err(DequalifyError::source_tree(tree));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(tree).sort_by_file_name() {
        let entry = entry.map_err(|e| DequalifyError::walk(tree, e))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// How a run treats files that would change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite changed files in place
    #[default]
    Write,
    /// Compute changes but never touch the filesystem
    DryRun,
}

/// Report for one file that changed (or would change, in a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub new_imports: Vec<String>,
    pub replacements: usize,
    pub written: bool,
}

/// Where the pipeline reads sources from and writes rewrites to
#[cfg_attr(test, mockall::automock)]
pub trait SourceStore {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// [`SourceStore`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl SourceStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

/// Run the full pipeline on one file.
///
/// Returns `Ok(None)` when the file needs no change; the file is then left
/// untouched.
pub fn process_file(
    path: &Path,
    options: &ResolveOptions,
    mode: WriteMode,
) -> DequalifyResult<Option<FileOutcome>> {
    process_file_with(&FsStore, path, options, mode)
}

/// [`process_file`] against an arbitrary [`SourceStore`]
pub fn process_file_with(
    store: &dyn SourceStore,
    path: &Path,
    options: &ResolveOptions,
    mode: WriteMode,
) -> DequalifyResult<Option<FileOutcome>> {
    let source = store.read(path).map_err(|e| DequalifyError::read(path, e))?;

    let Some(rewrite) = rewrite_source(&source, options) else {
        debug!(path = %path.display(), "No changes");
        return Ok(None);
    };

    let written = match mode {
        WriteMode::Write => {
            store
                .write(path, &rewrite.content)
                .map_err(|e| DequalifyError::write(path, e))?;
            true
        }
        WriteMode::DryRun => false,
    };

    Ok(Some(FileOutcome {
        path: path.to_path_buf(),
        new_imports: rewrite.new_imports,
        replacements: rewrite.replacements,
        written,
    }))
}

/// Totals for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files the pipeline was attempted on
    pub analyzed: usize,
    /// Files that changed (or would change)
    pub updated: usize,
    /// Imports added across all files
    pub imports_added: usize,
    /// Files that could not be read or written
    pub failed: usize,
    /// Source trees that could not be walked
    pub skipped_trees: usize,
}

/// Batch runner over source trees and files
#[derive(Debug, Clone)]
pub struct Dequalifier {
    options: ResolveOptions,
    mode: WriteMode,
    extension: String,
}

impl Default for Dequalifier {
    fn default() -> Self {
        Self::new(ResolveOptions::default())
    }
}

impl Dequalifier {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            options,
            mode: WriteMode::default(),
            extension: JAVA_EXTENSION.to_string(),
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Process every matching file under each of `targets`.
    ///
    /// A target may be a directory (walked recursively) or a single file.
    /// `on_update` is called for each file that changed, in processing order.
    pub fn run<F>(&self, targets: &[PathBuf], on_update: F) -> RunSummary
    where
        F: FnMut(&FileOutcome),
    {
        self.run_with(&FsStore, targets, on_update)
    }

    /// [`Dequalifier::run`] with file contents going through `store`
    pub fn run_with<F>(
        &self,
        store: &dyn SourceStore,
        targets: &[PathBuf],
        mut on_update: F,
    ) -> RunSummary
    where
        F: FnMut(&FileOutcome),
    {
        let mut summary = RunSummary::default();

        for target in targets {
            let files = if target.is_file() {
                if has_extension(target, &self.extension) {
                    vec![target.clone()]
                } else {
                    warn!(path = %target.display(), extension = %self.extension, "Skipping file with unrecognized extension");
                    continue;
                }
            } else {
                match collect_source_files(target, &self.extension) {
                    Ok(files) => files,
                    Err(e) => {
                        warn!(error = %e, "Skipping source tree");
                        summary.skipped_trees += 1;
                        continue;
                    }
                }
            };

            info!(target = %target.display(), files = files.len(), "Processing source tree");

            for file in files {
                summary.analyzed += 1;
                match process_file_with(store, &file, &self.options, self.mode) {
                    Ok(Some(outcome)) => {
                        summary.updated += 1;
                        summary.imports_added += outcome.new_imports.len();
                        on_update(&outcome);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!(error = %e, path = %e.path().display(), "Failed to process file");
                        summary.failed += 1;
                    }
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("backend/src/main");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested, &[".git"]), dir.path());
    }

    #[test]
    fn test_find_project_root_falls_back_to_start() {
        let dir = TempDir::new().unwrap();
        let root = find_project_root(dir.path(), &["no-such-marker-dir-xyz"]);
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_collect_source_files_filters_extension() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("com/acme")).unwrap();
        fs::write(dir.path().join("com/acme/B.java"), "").unwrap();
        fs::write(dir.path().join("com/acme/A.java"), "").unwrap();
        fs::write(dir.path().join("com/acme/notes.txt"), "").unwrap();

        let files = collect_source_files(dir.path(), "java").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["A.java", "B.java"]);
    }

    #[test]
    fn test_collect_source_files_missing_tree() {
        let dir = TempDir::new().unwrap();
        let err = collect_source_files(&dir.path().join("missing"), "java").unwrap_err();
        assert!(matches!(err, DequalifyError::SourceTree { .. }));
    }

    #[test]
    fn test_process_file_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        let source = "class A { com.acme.Foo f; }\n";
        fs::write(&path, source).unwrap();

        let outcome = process_file(&path, &ResolveOptions::default(), WriteMode::DryRun)
            .unwrap()
            .unwrap();
        assert!(!outcome.written);
        assert_eq!(outcome.new_imports, vec!["com.acme.Foo"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_process_file_reports_write_failure() {
        let mut store = MockSourceStore::new();
        store
            .expect_read()
            .returning(|_| Ok("class A { com.acme.Foo f; }\n".to_string()));
        store.expect_write().returning(|_, _| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        });

        let path = Path::new("src/A.java");
        let err = process_file_with(&store, path, &ResolveOptions::default(), WriteMode::Write)
            .unwrap_err();
        assert!(matches!(err, DequalifyError::Write { .. }));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_unwritable_file_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.java"), "").unwrap();
        fs::write(dir.path().join("B.java"), "").unwrap();

        let mut store = MockSourceStore::new();
        store
            .expect_read()
            .times(2)
            .returning(|_| Ok("class A { com.acme.Foo f; }\n".to_string()));
        store
            .expect_write()
            .withf(|path, _| path.ends_with("A.java"))
            .times(1)
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")));
        store
            .expect_write()
            .withf(|path, content| {
                path.ends_with("B.java") && content == "import com.acme.Foo;\nclass A { Foo f; }\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut updated = Vec::new();
        let summary = Dequalifier::default().run_with(
            &store,
            &[dir.path().to_path_buf()],
            |outcome| updated.push(outcome.path.clone()),
        );

        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(updated, vec![dir.path().join("B.java")]);
    }
}
