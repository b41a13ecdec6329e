//! Mapping strategies backing a [`Reservation`](crate::Reservation).

use std::ptr::null_mut;

use libc::{MAP_ANONYMOUS, MAP_HUGE_2MB, MAP_HUGETLB, MAP_PRIVATE};

use crate::util::{HUGEPAGE_SIZE, Size};

/// Trait for strategies that map and unmap memory regions.
///
/// A [`Reservation`](crate::Reservation) hands the exact pointer and length
/// returned by [`map()`](Mapper::map) back to [`unmap()`](Mapper::unmap).
pub trait Mapper {
    /// Returns the size of a single page backing the mapping.
    fn page_size(&self) -> Size;

    /// Maps `len` bytes of read/write memory.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the kernel rejects the request.
    fn map(&mut self, len: usize) -> std::io::Result<*mut u8>;

    /// Unmaps a region returned by [`map()`](Mapper::map).
    ///
    /// # Safety
    ///
    /// `ptr` and `len` must be exactly the values of a previous successful
    /// `map` call, and the region must not be accessed afterwards.
    unsafe fn unmap(&mut self, ptr: *mut u8, len: usize) -> std::io::Result<()>;
}

/// Flags for a private anonymous mapping from the 2 MiB huge page pool.
///
/// `MAP_HUGE_2MB` pins the page size so lengths counted in [`HUGEPAGE_SIZE`]
/// stay valid for `munmap` on hosts whose default huge page size differs.
pub const HUGETLB_FLAGS: libc::c_int = MAP_PRIVATE | MAP_ANONYMOUS | MAP_HUGETLB | MAP_HUGE_2MB;

/// Anonymous, private `MAP_HUGETLB` mappings from the kernel's huge page pool.
///
/// # Platform Requirements
///
/// - Linux with 2 MiB huge pages preallocated, e.g. via
///   `/sys/kernel/mm/hugepages/hugepages-2048kB/nr_hugepages`
#[derive(Debug, Default, Copy, Clone)]
pub struct HugeTlbMapper {}

impl Mapper for HugeTlbMapper {
    fn page_size(&self) -> Size {
        HUGEPAGE_SIZE
    }

    fn map(&mut self, len: usize) -> std::io::Result<*mut u8> {
        let p = unsafe {
            libc::mmap(
                null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                HUGETLB_FLAGS,
                -1,
                0,
            )
        };
        if p == libc::MAP_FAILED {
            return Err(std::io::Error::last_os_error());
        }
        Ok(p as *mut u8)
    }

    unsafe fn unmap(&mut self, ptr: *mut u8, len: usize) -> std::io::Result<()> {
        if unsafe { libc::munmap(ptr as *mut libc::c_void, len) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}
