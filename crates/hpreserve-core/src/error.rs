use crate::util::Size;

/// Errors that can occur while reserving or holding huge pages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page count does not describe a mappable length
    #[error("{pages} pages of {page_size} do not form a valid mapping length")]
    InvalidLength {
        /// Requested page count
        pages: i64,
        /// Size of a single page
        page_size: Size,
    },
    /// The kernel rejected the mapping request
    #[error("mmap of {len} bytes failed: {source}")]
    Map {
        /// Requested mapping length in bytes
        len: usize,
        /// OS error reported by mmap
        source: std::io::Error,
    },
    /// Blocking or waiting for the interrupt signal failed
    #[error("signal handling failed: {0}")]
    Signal(#[source] std::io::Error),
}

/// Result type for hpreserve operations.
pub type Result<T> = std::result::Result<T, Error>;
