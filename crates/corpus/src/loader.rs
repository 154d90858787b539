use crate::document::{Corpus, Document};
use crate::error::Result;
use crate::scanner::FileScanner;
use crate::stats::LoadStats;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of the plain-text documents picked up by default
pub const DEFAULT_EXTENSION: &str = "txt";

/// Reads every eligible document under a root into an ordered [`Corpus`]
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    root: PathBuf,
    extension: String,
}

impl CorpusLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Scan and read the corpus. Never fails: a missing root gives an empty
    /// corpus and unreadable files are left out.
    pub fn load(&self) -> (Corpus, LoadStats) {
        let start = Instant::now();
        let mut stats = LoadStats::new();

        let scan = FileScanner::new(&self.root, self.extension.as_str()).scan();
        stats.discovered = scan.files.len() + scan.failures.len();
        for failure in scan.failures {
            log::debug!("Skipping unreadable document {failure}");
            stats.add_error(failure);
        }

        let mut documents = Vec::with_capacity(scan.files.len());
        for path in scan.files {
            match self.read_document(&path) {
                Ok((document, bytes, lossy)) => {
                    if lossy {
                        log::debug!("Decoded {} with replacement characters", path.display());
                    }
                    stats.add_file(bytes, lossy);
                    documents.push(document);
                }
                Err(e) => {
                    log::debug!("Skipping unreadable document {}: {e}", path.display());
                    stats.add_error(format!("{}: {e}", path.display()));
                }
            }
        }

        let corpus = Corpus::new(&self.root, documents);
        stats.time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Loaded {} documents from {} ({} skipped, {} ms)",
            stats.loaded,
            self.root.display(),
            stats.skipped,
            stats.time_ms
        );

        (corpus, stats)
    }

    fn read_document(&self, path: &Path) -> Result<(Document, usize, bool)> {
        let bytes = std::fs::read(path)?;
        let len = bytes.len();
        let (text, lossy) = decode_lossy(bytes);
        let document = Document::new(path, &self.root, text)?;
        Ok((document, len, lossy))
    }
}

fn decode_lossy(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_documents_in_path_order() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("hf_finance")).unwrap();
        fs::write(temp.path().join("b.txt"), "bonds").unwrap();
        fs::write(temp.path().join("a.txt"), "assets").unwrap();
        fs::write(temp.path().join("hf_finance").join("c.txt"), "credit").unwrap();

        let (corpus, stats) = CorpusLoader::new(temp.path()).load();

        let texts: Vec<_> = corpus.iter().map(Document::text).collect();
        assert_eq!(texts, vec!["assets", "bonds", "credit"]);
        assert_eq!(stats.discovered, 3);
        assert_eq!(stats.loaded, 3);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.bytes, 17);
    }

    #[test]
    fn malformed_bytes_are_replaced() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("odd.txt"), b"cash \xff\xfe flow").unwrap();

        let (corpus, stats) = CorpusLoader::new(temp.path()).load();

        assert_eq!(corpus.len(), 1);
        assert_eq!(stats.lossy, 1);
        let text = corpus.documents()[0].text();
        assert!(text.starts_with("cash "));
        assert!(text.ends_with(" flow"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn missing_root_is_empty_corpus() {
        let temp = tempdir().unwrap();
        let (corpus, stats) = CorpusLoader::new(temp.path().join("nope")).load();
        assert!(corpus.is_empty());
        assert_eq!(stats.discovered, 0);
        assert_eq!(stats.loaded, 0);
        assert!(stats.errors.is_empty());
    }

    #[test]
    fn custom_extension() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "plain").unwrap();
        fs::write(temp.path().join("b.md"), "markdown").unwrap();

        let (corpus, _) = CorpusLoader::new(temp.path()).with_extension("md").load();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].name(), "b.md");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_document_is_skipped_and_counted() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "Diversification reduces risk.").unwrap();
        fs::write(temp.path().join("hf_b.txt"), "Diversification across sectors.").unwrap();
        fs::write(temp.path().join("bad.txt"), b"risk \xff").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.txt"), temp.path().join("dangling.txt"))
            .unwrap();

        let (corpus, stats) = CorpusLoader::new(temp.path()).load();

        let names: Vec<_> = corpus.iter().map(Document::name).collect();
        assert_eq!(names, vec!["a.txt", "bad.txt", "hf_b.txt"]);
        assert_eq!(stats.discovered, 4);
        assert_eq!(stats.loaded, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.lossy, 1);
        assert_eq!(stats.errors.len(), 1);
        assert!(stats.errors[0].contains("dangling.txt"));
    }

    #[test]
    fn read_failure_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("removed.txt");
        fs::write(&path, "gone soon").unwrap();
        fs::remove_file(&path).unwrap();

        let loader = CorpusLoader::new(temp.path());
        let err = loader.read_document(&path).unwrap_err();
        assert!(matches!(err, crate::error::CorpusError::IoError(_)));
    }
}
