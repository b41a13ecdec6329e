//! Utility types and constants used throughout hpreserve.
//!
//! - [`Size`] - Memory size representation
//! - [`HUGEPAGE_SIZE`] - The huge page granule reservations are counted in

mod constants;
mod size;

pub use self::constants::*;
pub use self::size::Size;
