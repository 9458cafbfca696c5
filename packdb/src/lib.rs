//! Fixed-size record pages for an in-memory storage engine.
//!
//! The core of this crate is [`Page`]: a single contiguous arena that holds a
//! packed array of equal-length records behind a small header. Records are
//! added at the end, located by content for deletes and updates, and read back
//! by their slot position.
//!
//! Slot ids returned by [`Page::add_record`] are positions, not keys. Deleting
//! a record moves the last record of the page into the freed slot, so a slot
//! id only identifies a record until the next delete.
//!
//! Two small value types sit around the page:
//!
//! - [`Record`]: an owned copy of a record payload.
//! - [`Table`]: a named container, which only owns its name for now.
//!
//! None of these types are synchronized. Callers must serialize access to each
//! instance.

#![warn(missing_docs, unreachable_pub)]

mod error;
pub use error::{Error, Result};

mod options;
pub use options::Options;

pub mod page;
pub use page::{Page, PageIter};

pub mod record;
pub use record::Record;

mod stats;
pub use stats::PageStats;

pub mod table;
pub use table::Table;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_with_records() {
        let mut page = Page::open(Options {
            capacity: 1024,
            record_size: 18,
        })
        .unwrap();

        let jeff = Record::from(b"hello,my,name,jeff".as_slice());
        let john = Record::from(b"hello,my,name,john".as_slice());
        assert_eq!(page.add_record(jeff.as_bytes()).unwrap(), 0);
        assert_eq!(page.add_record(john.as_bytes()).unwrap(), 1);

        assert_eq!(page.delete_record(jeff.as_bytes()).unwrap(), 0);
        assert_eq!(page.len(), 1);
        assert_eq!(page.read_record(0), Some(john));
        assert_eq!(page.read_record(1), None);
    }

    #[test]
    fn table_name() {
        assert!(Table::new("").is_none());
        let table = Table::new("orders").unwrap();
        assert_eq!(table.name(), "orders");
        table.free();
    }
}
