use crate::term_stats::{InverseDocumentFrequency, TermFrequencies};
use crate::tokenizer::{is_stopword, tokenize};
use finguide_corpus::Document;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

pub const DEFAULT_BOOST_SEGMENT: &str = "hf_finance";
pub const DEFAULT_BOOST_PREFIX: &str = "hf_";
pub const DEFAULT_BOOST_FACTOR: f64 = 1.3;

/// Multiplicative bonus for documents of the curated sub-collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainBoost {
    /// Directory name marking the curated collection (case-insensitive)
    pub segment: String,
    /// File name prefix marking a curated document (case-insensitive)
    pub prefix: String,
    pub factor: f64,
}

impl Default for DomainBoost {
    fn default() -> Self {
        Self {
            segment: DEFAULT_BOOST_SEGMENT.to_string(),
            prefix: DEFAULT_BOOST_PREFIX.to_string(),
            factor: DEFAULT_BOOST_FACTOR,
        }
    }
}

impl DomainBoost {
    /// Whether `path` belongs to the curated collection
    pub fn applies_to(&self, path: &Path) -> bool {
        let in_segment = !self.segment.is_empty()
            && path.components().any(|component| match component {
                Component::Normal(name) => name
                    .to_string_lossy()
                    .eq_ignore_ascii_case(&self.segment),
                _ => false,
            });
        if in_segment {
            return true;
        }

        !self.prefix.is_empty()
            && path
                .file_name()
                .map(|name| name.to_string_lossy().to_lowercase())
                .is_some_and(|name| name.starts_with(&self.prefix.to_lowercase()))
    }

    pub fn apply(&self, score: f64, path: &Path) -> f64 {
        if self.applies_to(path) {
            score * self.factor
        } else {
            score
        }
    }
}

/// Sparse TF-IDF dot product between query and document term frequencies.
///
/// Not normalized by document magnitude, so long repetitive documents score higher.
pub fn dot_product(
    query: &TermFrequencies,
    document: &TermFrequencies,
    idf: &InverseDocumentFrequency,
) -> f64 {
    let mut score = 0.0;
    for (term, query_weight) in query.iter() {
        if is_stopword(term) {
            continue;
        }
        let Some(doc_weight) = document.get(term) else {
            continue;
        };
        let idf_weight = idf.get(term).unwrap_or(1.0);
        score += query_weight * idf_weight * doc_weight;
    }
    score
}

/// Relevance of `document` for `query`, boost included
pub fn score_document(
    query: &str,
    document: &Document,
    idf: &InverseDocumentFrequency,
    boost: &DomainBoost,
) -> f64 {
    let query_tf = TermFrequencies::from_tokens(&tokenize(query));
    score_tokens(&query_tf, &tokenize(document.text()), document, idf, boost)
}

/// [`score_document`] over an already tokenized query and document text
pub fn score_tokens<S: AsRef<str>>(
    query_tf: &TermFrequencies,
    doc_tokens: &[S],
    document: &Document,
    idf: &InverseDocumentFrequency,
    boost: &DomainBoost,
) -> f64 {
    let doc_tf = TermFrequencies::from_tokens(doc_tokens);
    boost.apply(dot_product(query_tf, &doc_tf, idf), document.relative_path())
}
