use super::Size;

/// Huge page size every reservation is measured in.
///
/// This is assumed, not queried from the kernel. A system whose default
/// huge page size differs only gets a warning.
pub const HUGEPAGE_SIZE: Size = Size::MB(2);

/// Kernel memory statistics, including the huge page pool counters.
pub const MEMINFO_PATH: &str = "/proc/meminfo";
