use std::fmt;

use log::warn;

use crate::error::{Error, Result};
use crate::mapper::Mapper;
use crate::request::PageCount;

/// A live huge page mapping.
///
/// Base address and length are fixed at [`acquire()`](Reservation::acquire)
/// and handed unchanged to [`Mapper::unmap`]. [`release()`](Reservation::release)
/// consumes the reservation; dropping an unreleased reservation unmaps it.
pub struct Reservation<M: Mapper> {
    base: *mut u8,
    len: usize,
    pages: PageCount,
    mapper: M,
    released: bool,
}

impl<M: Mapper> Reservation<M> {
    /// Maps `pages` pages of the mapper's page size.
    ///
    /// Exactly one map request is issued; its outcome is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `pages` does not describe a valid
    /// length, or [`Error::Map`] if the kernel rejects the request.
    pub fn acquire(mut mapper: M, pages: PageCount) -> Result<Self> {
        let len = pages.mapping_len(mapper.page_size())?;
        let base = mapper.map(len).map_err(|source| Error::Map { len, source })?;
        Ok(Reservation {
            base,
            len,
            pages,
            mapper,
            released: false,
        })
    }

    /// Base address of the mapping.
    pub fn base(&self) -> *mut u8 {
        self.base
    }

    /// Length of the mapping in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the mapping spans zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of pages the mapping was requested with.
    pub fn pages(&self) -> PageCount {
        self.pages
    }

    /// Unmaps the region with the base address and length it was mapped with.
    ///
    /// # Errors
    ///
    /// Returns the OS error if unmapping fails. The mapping is considered
    /// released either way.
    pub fn release(mut self) -> std::io::Result<()> {
        self.released = true;
        unsafe { self.mapper.unmap(self.base, self.len) }
    }
}

impl<M: Mapper> Drop for Reservation<M> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = unsafe { self.mapper.unmap(self.base, self.len) } {
            warn!("Failed to unmap {:p} ({} bytes): {}", self.base, self.len, e);
        }
    }
}

impl<M: Mapper> fmt::Debug for Reservation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reservation")
            .field("base", &self.base)
            .field("len", &self.len)
            .field("pages", &self.pages)
            .field("released", &self.released)
            .finish()
    }
}
