//! Reserve, wait for the interrupt, release.

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::mapper::Mapper;
use crate::meminfo::{HugepageInfo, SYSTEM_HUGEPAGE_SIZE};
use crate::request::PageCount;
use crate::reservation::Reservation;
use crate::signal::Interrupt;

/// Outcome of a completed hold.
#[derive(Debug)]
pub struct HoldReport {
    /// Pages that were held
    pub pages: PageCount,
    /// Base address of the released mapping
    pub base: usize,
    /// Length of the released mapping in bytes
    pub len: usize,
    /// Signal that ended the hold
    pub signal: libc::c_int,
    /// Whether the kernel accepted the unmap request
    pub released: bool,
}

/// Holds `pages` huge pages until `interrupt` fires.
///
/// The interrupt source must already be armed, so a signal arriving while the
/// mapping is being set up is not lost. Exactly one mapping request is made
/// and, once it succeeds, exactly one release with the same base and length.
///
/// # Errors
///
/// Returns an error if the mapping cannot be created or waiting for the
/// interrupt fails. A failing release is only logged.
pub fn hold<M: Mapper>(
    mapper: M,
    pages: PageCount,
    interrupt: &mut dyn Interrupt,
) -> Result<HoldReport> {
    info!("=== Reserving Hugepages ==");
    inspect_pool(&mapper, pages);

    let reservation = Reservation::acquire(mapper, pages)?;
    info!("Huge pages have been reserved.");
    info!("Number of hugepages: {}", reservation.pages());
    info!("Pointer: {:p}", reservation.base());
    match HugepageInfo::read() {
        Ok(pool) => debug!("Hugepage pool after reservation: {}", pool),
        Err(e) => debug!("Failed to read hugepage pool: {}", e),
    }
    info!("Waiting for interruption...");

    let signal = interrupt.wait().map_err(Error::Signal)?;
    debug!("Received signal {}", signal);

    info!("Free memory");
    let base = reservation.base() as usize;
    let len = reservation.len();
    let released = match reservation.release() {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to unmap 0x{:x} ({} bytes): {}", base, len, e);
            false
        }
    };
    info!("========= EXITED =========");
    Ok(HoldReport {
        pages,
        base,
        len,
        signal,
        released,
    })
}

fn inspect_pool<M: Mapper>(mapper: &M, pages: PageCount) {
    if let Some(system) = *SYSTEM_HUGEPAGE_SIZE
        && system != mapper.page_size()
    {
        warn!(
            "Default hugepage size is {}, pool counters refer to it while reservations use {}",
            system,
            mapper.page_size()
        );
    }
    let pool = match HugepageInfo::read() {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Failed to read hugepage pool: {}", e);
            return;
        }
    };
    debug!("Hugepage pool before reservation: {}", pool);
    if pages.0 > 0 && pool.available() < pages.0 as u64 {
        warn!(
            "Requesting {} hugepages but only {} are available",
            pages,
            pool.available()
        );
    }
}
