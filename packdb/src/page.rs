//! Fixed-size record pages.
//!
//! A page is a single arena that starts with a header and continues with a
//! packed array of slots:
//!
//! ```text
//! [capacity][record_size][num_records][slot 0][slot 1]...[slot n-1]
//! ```
//!
//! Every slot is exactly `record_size` bytes, and the occupied slots always
//! form the prefix `[0, num_records)` of the slot array.

use std::{fmt, iter::FusedIterator, ops::Range, slice::ChunksExact};

use log::{debug, trace};

use crate::{stats::LocalStats, Error, Options, PageStats, Record, Result};

/// Page format {
///     capacity    : 8 bytes
///     record_size : 8 bytes
///     num_records : 8 bytes
///     slots       : record_size * num_records bytes
/// }
const CAPACITY_OFFSET: usize = 0;
const RECORD_SIZE_OFFSET: usize = 8;
const NUM_RECORDS_OFFSET: usize = 16;

/// The size of the page header in bytes.
pub const PAGE_HEADER_LEN: usize = 24;

/// The smallest page capacity accepted by [`Page::new`].
pub const MIN_PAGE_SIZE: usize = 128;

/// A fixed-capacity page of fixed-size records.
///
/// # Slot ids
///
/// The slot id returned by [`Page::add_record`] is the current position of the
/// record in the page, not a stable key. [`Page::delete_record`] fills the
/// freed slot with the last record of the page, so after a delete the old slot
/// id of that last record is out of range and the deleted slot id refers to
/// it instead. Never keep slot ids across deletes.
pub struct Page {
    buf: Box<[u8]>,
    stats: LocalStats,
}

impl Page {
    /// Creates an empty page of `capacity` bytes, header included, that stores
    /// records of `record_size` bytes.
    ///
    /// Returns [`Error::InvalidPageSize`] if `capacity` is below
    /// [`MIN_PAGE_SIZE`], if `record_size` is zero, or if the page cannot hold
    /// the header and at least one record.
    pub fn new(capacity: usize, record_size: usize) -> Result<Self> {
        if capacity < MIN_PAGE_SIZE
            || capacity <= PAGE_HEADER_LEN
            || record_size == 0
            || !has_space(capacity, record_size, 0)
        {
            debug!("Reject page with capacity {capacity} and record size {record_size}");
            return Err(Error::InvalidPageSize {
                capacity,
                record_size,
            });
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity).map_err(|_| Error::MemoryLimit)?;
        buf.resize(capacity, 0);

        let mut page = Self {
            buf: buf.into_boxed_slice(),
            stats: LocalStats::default(),
        };
        page.put_header(CAPACITY_OFFSET, capacity);
        page.put_header(RECORD_SIZE_OFFSET, record_size);
        page.set_len(0);
        debug!("Create page {page:?}");
        Ok(page)
    }

    /// Creates an empty page with the given options.
    pub fn open(options: Options) -> Result<Self> {
        Self::new(options.capacity, options.record_size)
    }

    /// Releases the page in `page` and leaves [`None`] behind.
    ///
    /// Freeing an absent page does nothing.
    pub fn free(page: &mut Option<Page>) {
        if let Some(page) = page.take() {
            trace!("Free page {page:?}");
        }
    }

    /// Returns the total size of the page in bytes.
    pub fn capacity(&self) -> usize {
        self.header(CAPACITY_OFFSET)
    }

    /// Returns the size of every record in the page.
    pub fn record_size(&self) -> usize {
        self.header(RECORD_SIZE_OFFSET)
    }

    /// Returns the number of records in the page.
    pub fn len(&self) -> usize {
        self.header(NUM_RECORDS_OFFSET)
    }

    /// Returns true if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of records the page can hold.
    pub fn max_slots(&self) -> usize {
        (self.capacity() - PAGE_HEADER_LEN - 1) / self.record_size()
    }

    /// Returns the number of records that can still be added.
    pub fn free_slots(&self) -> usize {
        self.max_slots() - self.len()
    }

    /// Returns true if no more records can be added.
    pub fn is_full(&self) -> bool {
        !has_space(self.capacity(), self.record_size(), self.len())
    }

    /// Adds a record to the end of the page.
    ///
    /// On success, returns the slot id of the new record.
    ///
    /// Returns [`Error::InvalidArgument`] if the payload is not exactly
    /// [`record_size`](Page::record_size) bytes, or [`Error::NoSpace`] if the
    /// page is full.
    pub fn add_record(&mut self, payload: &[u8]) -> Result<usize> {
        self.check_payload(payload)?;
        let slot = self.len();
        if !has_space(self.capacity(), self.record_size(), slot) {
            self.stats.rejected.inc();
            return Err(Error::NoSpace);
        }
        let range = self.slot_range(slot);
        self.buf[range].copy_from_slice(payload);
        self.set_len(slot + 1);
        self.stats.add.inc();
        trace!("Add record to slot {slot}");
        Ok(slot)
    }

    /// Deletes the first record that matches the payload.
    ///
    /// The last record of the page is moved into the freed slot, so the
    /// returned slot id now refers to that record, unless the deleted record
    /// was the last one.
    ///
    /// Returns [`Error::NoRecords`] if the page is empty, or
    /// [`Error::RecordNotFound`] if no record matches.
    pub fn delete_record(&mut self, payload: &[u8]) -> Result<usize> {
        self.check_payload(payload)?;
        let len = self.len();
        if len == 0 {
            self.stats.rejected.inc();
            return Err(Error::NoRecords);
        }
        let slot = self.find(payload)?;

        let last = len - 1;
        let range = self.slot_range(last);
        if slot != last {
            let dest = self.slot_range(slot).start;
            self.buf.copy_within(range.clone(), dest);
        }
        self.buf[range].fill(0);
        self.set_len(last);
        self.stats.delete.inc();
        trace!("Delete record from slot {slot}, move slot {last} to it");
        Ok(slot)
    }

    /// Replaces the first record that matches `old` with `new` in place.
    ///
    /// Returns [`Error::RecordNotFound`] if no record matches `old`.
    pub fn update_record(&mut self, old: &[u8], new: &[u8]) -> Result<()> {
        self.check_payload(old)?;
        self.check_payload(new)?;
        let slot = self.find(old)?;
        let range = self.slot_range(slot);
        self.buf[range].copy_from_slice(new);
        self.stats.update.inc();
        trace!("Update record in slot {slot}");
        Ok(())
    }

    /// Returns a copy of the record in the slot.
    ///
    /// Returns [`None`] if the slot is not occupied.
    pub fn read_record(&self, slot: usize) -> Option<Record> {
        match self.get(slot) {
            Some(data) => {
                self.stats.read.inc();
                Some(Record::from(data))
            }
            None => {
                self.stats.rejected.inc();
                None
            }
        }
    }

    /// Returns the record in the slot without copying it.
    pub fn get(&self, slot: usize) -> Option<&[u8]> {
        if slot < self.len() {
            Some(&self.buf[self.slot_range(slot)])
        } else {
            None
        }
    }

    /// Returns an iterator over records in slot order.
    pub fn iter(&self) -> PageIter<'_> {
        let end = PAGE_HEADER_LEN + self.len() * self.record_size();
        PageIter {
            inner: self.buf[PAGE_HEADER_LEN..end].chunks_exact(self.record_size()),
        }
    }

    /// Returns the whole page arena, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the statistics of the page.
    pub fn stats(&self) -> PageStats {
        self.stats.snapshot()
    }
}

impl Page {
    fn header(&self, offset: usize) -> usize {
        let mut v = [0u8; 8];
        v.copy_from_slice(&self.buf[offset..offset + 8]);
        u64::from_le_bytes(v) as usize
    }

    fn put_header(&mut self, offset: usize, value: usize) {
        self.buf[offset..offset + 8].copy_from_slice(&(value as u64).to_le_bytes());
    }

    fn set_len(&mut self, len: usize) {
        self.put_header(NUM_RECORDS_OFFSET, len);
    }

    fn slot_range(&self, slot: usize) -> Range<usize> {
        let size = self.record_size();
        let start = PAGE_HEADER_LEN + slot * size;
        start..start + size
    }

    fn check_payload(&self, payload: &[u8]) -> Result<()> {
        if payload.len() != self.record_size() {
            self.stats.rejected.inc();
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Returns the lowest slot that holds the payload.
    fn find(&self, payload: &[u8]) -> Result<usize> {
        match self.iter().position(|record| record == payload) {
            Some(slot) => Ok(slot),
            None => {
                self.stats.rejected.inc();
                Err(Error::RecordNotFound)
            }
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Page")
            .field("capacity", &self.capacity())
            .field("record_size", &self.record_size())
            .field("num_records", &self.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Page {
    type Item = &'a [u8];
    type IntoIter = PageIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over records in a page.
pub struct PageIter<'a> {
    inner: ChunksExact<'a, u8>,
}

impl<'a> Iterator for PageIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PageIter<'_> {}

impl FusedIterator for PageIter<'_> {}

/// Returns true if a page can hold one more record after `len` records.
fn has_space(capacity: usize, record_size: usize, len: usize) -> bool {
    len.checked_add(1)
        .and_then(|n| n.checked_mul(record_size))
        .and_then(|n| n.checked_add(PAGE_HEADER_LEN))
        .is_some_and(|end| end < capacity)
}
