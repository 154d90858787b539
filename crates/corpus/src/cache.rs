use crate::document::Corpus;
use crate::loader::CorpusLoader;
use crate::stats::LoadStats;
use once_cell::sync::OnceCell;

/// Process-lifetime corpus cache.
///
/// The first call to [`CorpusCache::get`] scans the filesystem; every later call
/// returns the same corpus. Concurrent first callers block on a single scan.
#[derive(Debug)]
pub struct CorpusCache {
    loader: CorpusLoader,
    loaded: OnceCell<(Corpus, LoadStats)>,
}

impl CorpusCache {
    pub fn new(loader: CorpusLoader) -> Self {
        Self {
            loader,
            loaded: OnceCell::new(),
        }
    }

    /// Cache that is already populated, for callers that hold documents in memory
    pub fn preloaded(loader: CorpusLoader, corpus: Corpus) -> Self {
        let stats = LoadStats {
            discovered: corpus.len(),
            loaded: corpus.len(),
            bytes: corpus.iter().map(|doc| doc.text().len() as u64).sum(),
            ..LoadStats::default()
        };
        Self {
            loader,
            loaded: OnceCell::with_value((corpus, stats)),
        }
    }

    pub fn get(&self) -> &Corpus {
        &self.entry().0
    }

    /// Statistics of the load that populated the cache
    pub fn stats(&self) -> &LoadStats {
        &self.entry().1
    }

    /// Populate the cache ahead of the first query
    pub fn warm(&self) -> usize {
        self.get().len()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn entry(&self) -> &(Corpus, LoadStats) {
        self.loaded.get_or_init(|| self.loader.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn loads_once_and_ignores_later_changes() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha").unwrap();

        let cache = CorpusCache::new(CorpusLoader::new(temp.path()));
        assert!(!cache.is_loaded());
        assert_eq!(cache.get().len(), 1);
        assert!(cache.is_loaded());

        fs::write(temp.path().join("b.txt"), "beta").unwrap();
        assert_eq!(cache.get().len(), 1);
    }

    #[test]
    fn preloaded_cache_never_scans() {
        let root = Path::new("/definitely/not/here");
        let corpus = Corpus::new(
            root,
            vec![Document::new(root.join("a.txt"), root, "alpha").unwrap()],
        );
        let cache = CorpusCache::preloaded(CorpusLoader::new(root), corpus);
        assert!(cache.is_loaded());
        assert_eq!(cache.get().len(), 1);
        assert_eq!(cache.stats().bytes, 5);
    }

    #[test]
    fn concurrent_first_access_sees_one_corpus() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha").unwrap();
        let cache = CorpusCache::new(CorpusLoader::new(temp.path()));

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| cache.get().len())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 1);
            }
        });
        assert_eq!(cache.stats().loaded, 1);
    }
}
