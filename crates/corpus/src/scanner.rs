use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found by a scan, plus eligible entries that could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub failures: Vec<String>,
}

/// Scanner for finding knowledge documents under a root directory
pub struct FileScanner {
    root: PathBuf,
    extension: String,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Recursively collect files with the configured extension, sorted by path.
    ///
    /// A missing root yields no files. Walk errors on paths with the
    /// configured extension are reported as failures; other walk errors are
    /// only logged.
    pub fn scan(&self) -> ScanResult {
        if !self.root.is_dir() {
            log::debug!("Docs root {} does not exist", self.root.display());
            return ScanResult::default();
        }

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for result in WalkDir::new(&self.root).follow_links(true) {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if !self.has_extension(path) {
                        continue;
                    }
                    files.push(path.to_path_buf());
                }
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    if let Some(path) = e.path().filter(|path| self.has_extension(path)) {
                        failures.push(format!("{}: {e}", path.display()));
                    }
                }
            }
        }

        files.sort();
        log::debug!(
            "Found {} .{} files under {}",
            files.len(),
            self.extension,
            self.root.display()
        );
        ScanResult { files, failures }
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}
