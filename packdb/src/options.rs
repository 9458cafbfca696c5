/// Options to configure a page.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Total size of the page arena in bytes, including the header.
    ///
    /// Must be at least [`MIN_PAGE_SIZE`](crate::page::MIN_PAGE_SIZE) and
    /// large enough to hold the header and one record.
    ///
    /// Default: 8KB
    pub capacity: usize,

    /// Size of every record stored in the page.
    ///
    /// Every payload passed to the page must have exactly this length.
    ///
    /// Default: 64
    pub record_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            capacity: 8 << 10,
            record_size: 64,
        }
    }
}
