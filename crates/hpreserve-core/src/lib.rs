//! # hpreserve core
//!
//! Building blocks for holding a block of huge pages until the operator
//! interrupts the process.
//!
//! - [`Mapper`] - Strategy for mapping and unmapping memory, implemented by
//!   [`HugeTlbMapper`] for anonymous `MAP_HUGETLB` mappings.
//! - [`Reservation`] - A live mapping that is released exactly once with the
//!   base address and length it was created with.
//! - [`Interrupt`] - Blocking wait for the stop request, implemented by
//!   [`SignalWaiter`] on top of `sigwait`.
//! - [`hold()`] - The whole lifecycle: reserve, wait, release.
//!
//! ## Platform Support
//!
//! Linux only. Huge pages must be preallocated, e.g. through
//! `/proc/sys/vm/nr_hugepages`, or mapping requests are rejected.

#![warn(missing_docs)]

mod error;
mod hold;
pub mod mapper;
pub mod meminfo;
mod request;
mod reservation;
pub mod signal;
pub mod util;

pub use crate::error::{Error, Result};
pub use crate::hold::{HoldReport, hold};
pub use crate::mapper::{HugeTlbMapper, Mapper};
pub use crate::meminfo::HugepageInfo;
pub use crate::request::PageCount;
pub use crate::reservation::Reservation;
pub use crate::signal::{Interrupt, SignalWaiter};
