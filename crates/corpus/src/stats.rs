use serde::{Deserialize, Serialize};

/// Statistics about a corpus load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Files matched by the scanner
    pub discovered: usize,

    /// Files read into the corpus
    pub loaded: usize,

    /// Files that could not be opened
    pub skipped: usize,

    /// Files that contained malformed UTF-8 and were decoded lossily
    pub lossy: usize,

    /// Total bytes read
    pub bytes: u64,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Read errors encountered
    pub errors: Vec<String>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, bytes: usize, lossy: bool) {
        self.loaded += 1;
        self.bytes += bytes as u64;
        if lossy {
            self.lossy += 1;
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.skipped += 1;
        self.errors.push(error);
    }
}
