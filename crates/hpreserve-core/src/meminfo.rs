//! Huge page pool counters from `/proc/meminfo`.
//!
//! See <https://www.kernel.org/doc/Documentation/vm/hugetlbpage.txt>. The
//! relevant lines look like:
//!
//! ```text
//! HugePages_Total: uuu
//! HugePages_Free:  vvv
//! HugePages_Rsvd:  www
//! HugePages_Surp:  xxx
//! Hugepagesize:    yyy kB
//! ```

use std::fs;

use lazy_static::lazy_static;

use crate::util::{MEMINFO_PATH, Size};

lazy_static! {
    /// Default huge page size reported by the kernel, if any.
    pub static ref SYSTEM_HUGEPAGE_SIZE: Option<Size> = HugepageInfo::read()
        .ok()
        .and_then(|info| info.page_size);
}

/// Snapshot of the kernel's huge page pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HugepageInfo {
    /// `HugePages_Total`
    pub total: u64,
    /// `HugePages_Free`
    pub free: u64,
    /// `HugePages_Rsvd`
    pub reserved: u64,
    /// `HugePages_Surp`
    pub surplus: u64,
    /// `Hugepagesize`, absent on kernels without hugetlb support
    pub page_size: Option<Size>,
}

impl HugepageInfo {
    /// Reads the current pool counters.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `/proc/meminfo` cannot be read.
    pub fn read() -> std::io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(MEMINFO_PATH)?))
    }

    /// Parses the huge page lines of a meminfo dump. Unknown or malformed
    /// lines are skipped.
    pub fn parse(s: &str) -> Self {
        let mut info = HugepageInfo::default();
        for line in s.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let mut parts = value.split_whitespace();
            let Some(Ok(n)) = parts.next().map(str::parse::<u64>) else {
                continue;
            };
            match key {
                "HugePages_Total" => info.total = n,
                "HugePages_Free" => info.free = n,
                "HugePages_Rsvd" => info.reserved = n,
                "HugePages_Surp" => info.surplus = n,
                "Hugepagesize" => {
                    info.page_size = match parts.next() {
                        Some("kB") => Some(Size::KB(n as usize)),
                        None => Some(Size::B(n as usize)),
                        Some(_) => None,
                    }
                }
                _ => {}
            }
        }
        info
    }

    /// Pages that can still be handed to a new mapping.
    pub fn available(&self) -> u64 {
        self.free.saturating_sub(self.reserved)
    }
}

impl std::fmt::Display for HugepageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total={} free={} rsvd={} surp={}",
            self.total, self.free, self.reserved, self.surplus
        )?;
        if let Some(size) = self.page_size {
            write!(f, " size={}", size)?;
        }
        Ok(())
    }
}
