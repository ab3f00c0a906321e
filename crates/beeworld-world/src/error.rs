//! Error types for the `beeworld-world` crate.
//!
//! Terrain loading is the only fallible operation in this crate; everything
//! that happens during a run (rejected moves, empty collections) is a silent
//! no-op by design.

/// Errors that can occur while loading a terrain map.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The map file could not be read from disk.
    #[error("failed to read map file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A data row could not be parsed.
    #[error("malformed map row at line {line}: {reason}")]
    MalformedRow {
        /// 1-based line number within the map file.
        line: usize,
        /// Explanation of what was wrong with the row.
        reason: String,
    },
}
