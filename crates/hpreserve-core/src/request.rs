//! Page count parsing and mapping length computation.

use crate::error::{Error, Result};
use crate::util::Size;

/// Number of huge pages requested on the command line.
///
/// Kept signed so that negative input survives parsing and is rejected when
/// the mapping length is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageCount(pub i64);

impl PageCount {
    /// Parses a base-10 page count the way `strtol` does.
    ///
    /// Works on raw bytes, so arguments that are not valid UTF-8 still parse.
    /// Leading whitespace is skipped, an optional sign is accepted and the
    /// longest run of digits is used. Input without digits yields zero and
    /// out-of-range values saturate.
    ///
    /// ```
    /// use hpreserve_core::PageCount;
    ///
    /// assert_eq!(PageCount::parse_lenient("4"), PageCount(4));
    /// assert_eq!(PageCount::parse_lenient("abc"), PageCount(0));
    /// assert_eq!(PageCount::parse_lenient("12abc"), PageCount(12));
    /// ```
    pub fn parse_lenient(s: impl AsRef<[u8]>) -> Self {
        let s = s.as_ref();
        let start = s
            .iter()
            .position(|&c| !matches!(c, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
            .unwrap_or(s.len());
        let s = &s[start..];
        let (negative, digits) = match s.first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let mut value: i64 = 0;
        for &d in digits.iter().take_while(|d| d.is_ascii_digit()) {
            let d = i64::from(d - b'0');
            let next = value.checked_mul(10).and_then(|v| {
                if negative {
                    v.checked_sub(d)
                } else {
                    v.checked_add(d)
                }
            });
            match next {
                Some(v) => value = v,
                None => return PageCount(if negative { i64::MIN } else { i64::MAX }),
            }
        }
        PageCount(value)
    }

    /// Byte length of a mapping holding this many pages of `page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] for negative counts or when the
    /// product does not fit in `usize`.
    pub fn mapping_len(&self, page_size: Size) -> Result<usize> {
        let invalid = || Error::InvalidLength {
            pages: self.0,
            page_size,
        };
        let pages = usize::try_from(self.0).map_err(|_| invalid())?;
        page_size.checked_times(pages).ok_or_else(invalid)
    }
}

impl std::fmt::Display for PageCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PageCount {
    fn from(value: i64) -> Self {
        PageCount(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::HUGEPAGE_SIZE;

    #[test]
    fn test_parse_lenient() {
        // plain.
        assert_eq!(PageCount::parse_lenient("0"), PageCount(0));
        assert_eq!(PageCount::parse_lenient("4"), PageCount(4));
        assert_eq!(PageCount::parse_lenient("+16"), PageCount(16));
        assert_eq!(PageCount::parse_lenient(" \t\n7"), PageCount(7));
        assert_eq!(PageCount::parse_lenient("-3"), PageCount(-3));

        // degraded.
        assert_eq!(PageCount::parse_lenient("abc"), PageCount(0));
        assert_eq!(PageCount::parse_lenient(""), PageCount(0));
        assert_eq!(PageCount::parse_lenient("-"), PageCount(0));
        assert_eq!(PageCount::parse_lenient("12abc"), PageCount(12));
        assert_eq!(PageCount::parse_lenient("4 5"), PageCount(4));
        assert_eq!(PageCount::parse_lenient("0x10"), PageCount(0));
        assert_eq!(PageCount::parse_lenient("--"), PageCount(0));
        assert_eq!(PageCount::parse_lenient("\x0b\x0c9"), PageCount(9));
    }

    #[test]
    fn test_parse_non_utf8() {
        assert_eq!(PageCount::parse_lenient(b"4\xff"), PageCount(4));
        assert_eq!(PageCount::parse_lenient(b"\xff4"), PageCount(0));
        assert_eq!(PageCount::parse_lenient(b" -2\xfe\xff"), PageCount(-2));
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(
            PageCount::parse_lenient("99999999999999999999"),
            PageCount(i64::MAX)
        );
        assert_eq!(
            PageCount::parse_lenient("-99999999999999999999"),
            PageCount(i64::MIN)
        );
        assert_eq!(
            PageCount::parse_lenient("-9223372036854775808"),
            PageCount(i64::MIN)
        );
    }

    #[test]
    fn test_mapping_len() {
        assert_eq!(
            PageCount(4).mapping_len(HUGEPAGE_SIZE).unwrap(),
            8 * 1024 * 1024
        );
        assert_eq!(PageCount(0).mapping_len(HUGEPAGE_SIZE).unwrap(), 0);
        assert!(matches!(
            PageCount(-1).mapping_len(HUGEPAGE_SIZE),
            Err(Error::InvalidLength { pages: -1, .. })
        ));
        assert!(PageCount(i64::MAX).mapping_len(HUGEPAGE_SIZE).is_err());
    }
}
