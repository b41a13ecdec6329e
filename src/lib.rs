//! # hpreserve
//!
//! Holds a block of huge pages until the process is interrupted. The
//! `hpreserve` binary lives in the `hpreserve-bin` crate; this crate
//! re-exports the building blocks from `hpreserve-core`.

pub use hpreserve_core::*;
