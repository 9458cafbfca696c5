use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Statistics of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageStats {
    /// Number of records added.
    pub add: u64,
    /// Number of records deleted.
    pub delete: u64,
    /// Number of records updated in place.
    pub update: u64,
    /// Number of successful reads.
    pub read: u64,
    /// Number of operations rejected with an error or an absent result.
    pub rejected: u64,
}

impl PageStats {
    /// Sub other stats to produce an new stats.
    pub fn sub(&self, o: &PageStats) -> PageStats {
        PageStats {
            add: self.add.wrapping_sub(o.add),
            delete: self.delete.wrapping_sub(o.delete),
            update: self.update.wrapping_sub(o.update),
            read: self.read.wrapping_sub(o.read),
            rejected: self.rejected.wrapping_sub(o.rejected),
        }
    }
}

impl fmt::Display for PageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PageStats: add: {}, delete: {}, update: {}, read: {}, rejected: {}",
            self.add, self.delete, self.update, self.read, self.rejected
        )
    }
}

/// Page counters.
///
/// Reads only borrow the page, so every counter is updated through `&self`.
#[derive(Default)]
pub(crate) struct LocalStats {
    pub(crate) add: Counter,
    pub(crate) delete: Counter,
    pub(crate) update: Counter,
    pub(crate) read: Counter,
    pub(crate) rejected: Counter,
}

impl LocalStats {
    pub(crate) fn snapshot(&self) -> PageStats {
        PageStats {
            add: self.add.get(),
            delete: self.delete.get(),
            update: self.update.get(),
            read: self.read.get(),
            rejected: self.rejected.get(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Counter(AtomicU64);

impl Counter {
    pub(crate) const fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_and_sub() {
        let stats = LocalStats::default();
        stats.add.inc();
        stats.add.inc();
        let base = stats.snapshot();
        stats.read.inc();
        stats.rejected.inc();
        let now = stats.snapshot();
        assert_eq!(now.add, 2);
        let diff = now.sub(&base);
        assert_eq!(
            diff,
            PageStats {
                read: 1,
                rejected: 1,
                ..Default::default()
            }
        );
    }
}
