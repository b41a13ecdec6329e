/// Memory size with a binary unit.
///
/// All units use base-2 multipliers (1 KB = 1024 bytes).
///
/// # Examples
///
/// ```
/// use hpreserve_core::util::Size;
///
/// assert_eq!(Size::MB(2).bytes(), 2 * 1024 * 1024);
/// assert_eq!(Size::KB(2048).bytes(), Size::MB(2).bytes());
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Size {
    /// Size in bytes
    B(usize),
    /// Size in kilobytes
    KB(usize),
    /// Size in megabytes
    MB(usize),
    /// Size in gigabytes
    GB(usize),
}

impl Size {
    /// Converts this size to bytes.
    pub const fn bytes(&self) -> usize {
        match self {
            Size::B(bytes) => *bytes,
            Size::KB(kb) => *kb * (1 << 10),
            Size::MB(mb) => *mb * (1 << 20),
            Size::GB(gb) => *gb * (1 << 30),
        }
    }

    /// Total size of `count` units of this size, or `None` on overflow.
    pub fn checked_times(&self, count: usize) -> Option<usize> {
        self.bytes().checked_mul(count)
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl Eq for Size {}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::B(bytes) => write!(f, "{} B", bytes),
            Size::KB(kb) => write!(f, "{} KB", kb),
            Size::MB(mb) => write!(f, "{} MB", mb),
            Size::GB(gb) => write!(f, "{} GB", gb),
        }
    }
}
