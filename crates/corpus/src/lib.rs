//! # FinGuide Corpus
//!
//! Discovery and in-memory caching of the plain-text knowledge documents.
//!
//! ## Pipeline
//!
//! ```text
//! Docs root
//!     │
//!     ├──> Scanner (recursive, extension filter)
//!     │      └─> Candidate files
//!     │
//!     ├──> Loader (lossy UTF-8, unreadable files skipped)
//!     │      └─> Ordered corpus
//!     │
//!     └──> Cache (loaded once per process)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use finguide_corpus::{CorpusCache, CorpusLoader};
//!
//! let cache = CorpusCache::new(CorpusLoader::new("docs"));
//! let corpus = cache.get();
//! println!("{} documents", corpus.len());
//! ```

mod cache;
mod document;
mod error;
mod loader;
mod scanner;
mod stats;

pub use cache::CorpusCache;
pub use document::{Corpus, Document};
pub use error::{CorpusError, Result};
pub use loader::{CorpusLoader, DEFAULT_EXTENSION};
pub use scanner::{FileScanner, ScanResult};
pub use stats::LoadStats;
