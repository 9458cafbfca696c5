//! Owned record payloads.

use std::{fmt, ops::Deref};

/// An owned copy of a record payload.
///
/// A record never borrows the bytes it was created from. A zero-length record
/// can be created, but it is never [valid](Record::is_valid).
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Record {
    buf: Box<[u8]>,
}

impl Record {
    /// Creates a record by copying the first `size` bytes of `bytes`.
    ///
    /// Returns [`None`] if `bytes` is shorter than `size`, or if the buffer
    /// cannot be allocated.
    pub fn new(bytes: &[u8], size: usize) -> Option<Self> {
        let src = bytes.get(..size)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(size).ok()?;
        buf.extend_from_slice(src);
        Some(Self {
            buf: buf.into_boxed_slice(),
        })
    }

    /// Releases the record in `record` and leaves [`None`] behind.
    ///
    /// Freeing an absent record does nothing.
    pub fn free(record: &mut Option<Record>) {
        record.take();
    }

    /// Returns true if the record holds at least one byte.
    pub fn is_valid(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Returns the size of the record in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the record payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the record and returns its payload.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into_vec()
    }
}

impl Deref for Record {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<&[u8]> for Record {
    fn from(bytes: &[u8]) -> Self {
        Self { buf: bytes.into() }
    }
}

impl From<Vec<u8>> for Record {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            buf: bytes.into_boxed_slice(),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("size", &self.buf.len())
            .field("data", &self.buf)
            .finish()
    }
}

/// Returns true if `record` is present and valid.
pub fn is_valid(record: Option<&Record>) -> bool {
    record.is_some_and(Record::is_valid)
}

/// Returns true if both records are present and hold the same bytes.
///
/// Two absent records are never equal.
pub fn are_equal(a: Option<&Record>, b: Option<&Record>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.len() == b.len() && a.as_bytes() == b.as_bytes(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_copies_bytes() {
        let mut bytes = b"hello".to_vec();
        let record = Record::new(&bytes, bytes.len()).unwrap();
        bytes[0] = b'j';
        assert_eq!(record.as_bytes(), b"hello");
        assert!(record.is_valid());
    }

    #[test]
    fn create_with_prefix() {
        let record = Record::new(b"hello", 4).unwrap();
        assert_eq!(record.as_bytes(), b"hell");
        assert_eq!(record.len(), 4);
        assert!(Record::new(b"hello", 6).is_none());
    }

    #[test]
    fn free_leaves_none() {
        let mut record = Record::new(b"hello", 5);
        Record::free(&mut record);
        assert!(record.is_none());
        // Freeing twice is fine.
        Record::free(&mut record);
        assert!(record.is_none());
    }

    #[test]
    fn validity() {
        assert!(!is_valid(None));
        let empty = Record::new(b"hello", 0).unwrap();
        assert!(empty.is_empty());
        assert!(!is_valid(Some(&empty)));
        let record = Record::new(b"hello", 5).unwrap();
        assert!(is_valid(Some(&record)));
    }

    #[test]
    fn equality() {
        let john = Record::from(b"john".as_slice());
        let jeff = Record::from(b"jeff".as_slice());
        assert!(!are_equal(None, None));
        assert!(!are_equal(Some(&john), None));
        assert!(!are_equal(None, Some(&john)));
        assert!(!are_equal(Some(&john), Some(&jeff)));
        assert!(are_equal(Some(&john), Some(&Record::from(b"john".to_vec()))));
        assert!(!are_equal(Some(&john), Some(&Record::new(b"johnny", 6).unwrap())));
        assert_eq!(john, Record::new(b"johnny", 4).unwrap());
    }
}
