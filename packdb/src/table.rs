//! Named tables.

use std::fmt;

use log::debug;

/// The maximum length of a table name, exclusive.
///
/// Table names must fit in a single path component, so this follows
/// `NAME_MAX` on common platforms.
pub const MAX_TABLE_NAME_LEN: usize = 255;

/// A named table.
///
/// A table only owns its name for now; it does not hold any pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    name: String,
}

impl Table {
    /// Creates a table with the given name.
    ///
    /// Returns [`None`] if the name is empty or not shorter than
    /// [`MAX_TABLE_NAME_LEN`] bytes.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() || name.len() >= MAX_TABLE_NAME_LEN {
            debug!("Reject table name of {} bytes", name.len());
            return None;
        }
        Some(Self {
            name: name.to_owned(),
        })
    }

    /// Returns the name of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Releases the table.
    pub fn free(self) {}
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create() {
        let table = Table::new("test").unwrap();
        assert_eq!(table.name(), "test");
        assert_eq!(table.to_string(), "test");
        table.free();
    }

    #[test]
    fn reject_empty_name() {
        assert!(Table::new("").is_none());
    }

    #[test]
    fn name_length_limit() {
        let name = "a".repeat(MAX_TABLE_NAME_LEN - 1);
        assert!(Table::new(&name).is_some());
        let name = "a".repeat(MAX_TABLE_NAME_LEN);
        assert!(Table::new(&name).is_none());
    }

    #[test]
    fn name_is_copied() {
        let mut name = String::from("orders");
        let table = Table::new(&name).unwrap();
        name.push_str("_v2");
        assert_eq!(table.name(), "orders");
    }
}
