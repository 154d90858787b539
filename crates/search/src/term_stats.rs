use crate::tokenizer::is_stopword;
use std::collections::{HashMap, HashSet};

/// Max-normalized term frequencies of one token sequence, stop-words excluded.
///
/// Terms keep the order of their first appearance.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    order: Vec<String>,
    weights: HashMap<String, f64>,
}

impl TermFrequencies {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut order = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            let token = token.as_ref();
            if is_stopword(token) {
                continue;
            }
            match counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    order.push(token.to_string());
                    counts.insert(token.to_string(), 1);
                }
            }
        }

        let max_count = counts.values().copied().max().unwrap_or(1) as f64;
        let weights = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 / max_count))
            .collect();

        Self { order, weights }
    }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    /// Terms with their weights, in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.order
            .iter()
            .map(|term| (term.as_str(), self.weights.get(term).copied().unwrap_or(0.0)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`
#[derive(Debug, Clone, Default)]
pub struct InverseDocumentFrequency {
    documents: usize,
    weights: HashMap<String, f64>,
}

impl InverseDocumentFrequency {
    pub fn from_token_sets<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in documents {
            let unique: HashSet<&str> = tokens.iter().map(|token| token.as_ref()).collect();
            for token in unique {
                if is_stopword(token) {
                    continue;
                }
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let weights = doc_freq
            .into_iter()
            .map(|(term, df)| (term.to_string(), smoothed_idf(n, df as f64)))
            .collect();

        Self {
            documents: documents.len(),
            weights,
        }
    }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn smoothed_idf(total_docs: f64, df: f64) -> f64 {
    ((total_docs + 1.0) / (df + 1.0)).ln() + 1.0
}
