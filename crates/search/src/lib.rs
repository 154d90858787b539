//! # FinGuide Search
//!
//! Local TF-IDF context retrieval for grounding a finance chat assistant.
//!
//! ```text
//! query ──> tokenize ──> TF ─┐
//!                            ├──> dot product ──> domain boost ──> rank ──> budgeted bundle
//! corpus ─> tokenize ──> IDF ┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use finguide_search::{RetrievalConfig, Retriever};
//!
//! let retriever = Retriever::new(&RetrievalConfig::default());
//! let context = retriever.retrieve("how do index funds reduce risk", 3, 800);
//! println!("{context}");
//! ```

mod assembly;
mod config;
mod error;
pub mod grounding;
mod retriever;
mod scorer;
mod term_stats;
mod tokenizer;

pub use assembly::{ContextBlock, ContextBundle};
pub use config::{CorpusConfig, Limits, RetrievalConfig, DEFAULT_K, DEFAULT_MAX_CHARS};
pub use error::{Result, SearchError};
pub use grounding::{ChatMessage, Conversation};
pub use retriever::{Retriever, ScoredDocument};
pub use scorer::{dot_product, score_document, score_tokens, DomainBoost};
pub use term_stats::{InverseDocumentFrequency, TermFrequencies};
pub use tokenizer::{is_stopword, tokenize};
