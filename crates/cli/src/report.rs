use finguide_corpus::{Corpus, LoadStats};
use finguide_search::ScoredDocument;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct CorpusReport<'a> {
    pub root: String,
    pub stats: &'a LoadStats,
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DocumentEntry {
    pub path: String,
    pub chars: usize,
    pub boosted: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankEntry {
    pub rank: usize,
    pub source: String,
    pub path: String,
    pub score: f64,
}

impl<'a> CorpusReport<'a> {
    pub(crate) fn new(
        corpus: &Corpus,
        stats: &'a LoadStats,
        is_boosted: impl Fn(&std::path::Path) -> bool,
    ) -> Self {
        let documents = corpus
            .iter()
            .map(|doc| DocumentEntry {
                path: display_path(doc.relative_path()),
                chars: doc.text().chars().count(),
                boosted: is_boosted(doc.relative_path()),
            })
            .collect();
        Self {
            root: corpus.root().display().to_string(),
            stats,
            documents,
        }
    }
}

pub(crate) fn rank_entries(ranked: &[ScoredDocument<'_>], limit: Option<usize>) -> Vec<RankEntry> {
    ranked
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, scored)| RankEntry {
            rank: idx + 1,
            source: scored.document.name(),
            path: display_path(scored.document.relative_path()),
            score: scored.score,
        })
        .collect()
}

fn display_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
