use finguide_corpus::Document;
use serde::Serialize;
use std::fmt;

const BLOCK_SEPARATOR: &str = "\n\n";

/// One labeled excerpt of the context bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextBlock {
    /// File name of the originating document
    pub source: String,
    pub excerpt: String,
    /// Excerpt was cut to fit the character budget
    pub truncated: bool,
}

impl fmt::Display for ContextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Source: {}]\n{}", self.source, self.excerpt)
    }
}

/// Budgeted excerpts of the top-ranked documents, in rank order.
///
/// Only excerpt characters count against `max_chars`; labels and separators
/// are overhead on top of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextBundle {
    blocks: Vec<ContextBlock>,
    used_chars: usize,
}

impl ContextBundle {
    /// Take up to `max(1, k)` ranked documents and cut them to the budget.
    ///
    /// Whitespace-only documents are skipped without being replaced. Assembly
    /// stops as soon as the budget is used up.
    pub fn assemble<'a, I>(ranked: I, k: usize, max_chars: usize) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut bundle = Self {
            blocks: Vec::new(),
            used_chars: 0,
        };

        for document in ranked.into_iter().take(k.max(1)) {
            let chunk = document.text().trim();
            if chunk.is_empty() {
                continue;
            }

            let remaining = max_chars.saturating_sub(bundle.used_chars);
            let chunk_chars = chunk.chars().count();
            let (excerpt, excerpt_chars, truncated) = if chunk_chars > remaining {
                (take_chars(chunk, remaining), remaining, true)
            } else {
                (chunk, chunk_chars, false)
            };

            bundle.blocks.push(ContextBlock {
                source: document.name(),
                excerpt: excerpt.to_string(),
                truncated,
            });
            bundle.used_chars += excerpt_chars;

            if bundle.used_chars >= max_chars {
                break;
            }
        }

        bundle
    }

    pub fn blocks(&self) -> &[ContextBlock] {
        &self.blocks
    }

    /// Excerpt characters consumed from the budget
    pub fn used_chars(&self) -> usize {
        self.used_chars
    }

    pub fn is_truncated(&self) -> bool {
        self.blocks.iter().any(|block| block.truncated)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContextBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                f.write_str(BLOCK_SEPARATOR)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
