use crate::assembly::ContextBundle;
use crate::config::{Limits, RetrievalConfig};
use crate::scorer::{score_tokens, DomainBoost};
use crate::term_stats::{InverseDocumentFrequency, TermFrequencies};
use crate::tokenizer::tokenize;
use finguide_corpus::{Corpus, CorpusCache, CorpusLoader, Document};
use serde::Serialize;
use std::cmp::Ordering;

/// A document with its positive relevance score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredDocument<'a> {
    pub score: f64,
    #[serde(serialize_with = "serialize_source")]
    pub document: &'a Document,
}

fn serialize_source<S: serde::Serializer>(
    document: &&Document,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&document.relative_path().to_string_lossy())
}

/// Local context retriever over a lazily loaded corpus.
///
/// Retrieval never fails: a missing corpus or a query without shared
/// vocabulary yields an empty context.
#[derive(Debug)]
pub struct Retriever {
    cache: CorpusCache,
    boost: DomainBoost,
    limits: Limits,
}

impl Retriever {
    pub fn new(config: &RetrievalConfig) -> Self {
        let loader = CorpusLoader::new(&config.corpus.root)
            .with_extension(config.corpus.extension.as_str());
        Self {
            cache: CorpusCache::new(loader),
            boost: config.boost.clone(),
            limits: config.limits,
        }
    }

    /// Retriever over documents already in memory
    pub fn from_corpus(corpus: Corpus, boost: DomainBoost) -> Self {
        let loader = CorpusLoader::new(corpus.root());
        Self {
            cache: CorpusCache::preloaded(loader, corpus),
            boost,
            limits: Limits::default(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        self.cache.get()
    }

    pub fn cache(&self) -> &CorpusCache {
        &self.cache
    }

    pub fn boost(&self) -> &DomainBoost {
        &self.boost
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// All documents with a positive score, best first. Ties keep corpus order.
    pub fn rank(&self, query: &str) -> Vec<ScoredDocument<'_>> {
        let corpus = self.cache.get();
        if corpus.is_empty() {
            return Vec::new();
        }

        let doc_tokens: Vec<Vec<String>> = corpus.iter().map(|doc| tokenize(doc.text())).collect();
        let idf = InverseDocumentFrequency::from_token_sets(&doc_tokens);
        let query_tf = TermFrequencies::from_tokens(&tokenize(query));

        let mut ranked: Vec<ScoredDocument<'_>> = corpus
            .iter()
            .zip(&doc_tokens)
            .filter_map(|(document, tokens)| {
                let score = score_tokens(&query_tf, tokens, document, &idf, &self.boost);
                (score > 0.0).then_some(ScoredDocument { score, document })
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        log::debug!(
            "Ranked {} of {} documents ({} query terms, {} idf terms)",
            ranked.len(),
            corpus.len(),
            query_tf.len(),
            idf.len()
        );
        ranked
    }

    pub fn bundle(&self, query: &str, k: usize, max_chars: usize) -> ContextBundle {
        let ranked = self.rank(query);
        ContextBundle::assemble(ranked.iter().map(|scored| scored.document), k, max_chars)
    }

    /// Formatted context for `query`: up to `max(1, k)` labeled excerpts within
    /// `max_chars` excerpt characters. Empty when nothing is relevant.
    pub fn retrieve(&self, query: &str, k: usize, max_chars: usize) -> String {
        self.bundle(query, k, max_chars).render()
    }

    /// [`Retriever::retrieve`] with the configured limits
    pub fn retrieve_default(&self, query: &str) -> String {
        self.retrieve(query, self.limits.k, self.limits.max_chars)
    }
}
