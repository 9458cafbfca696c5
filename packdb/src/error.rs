use thiserror::Error;

/// A list of possible errors returned by PackDB.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A payload does not match the record size of the page.
    #[error("Invalid argument")]
    InvalidArgument,
    /// The page layout cannot hold its header and at least one record.
    #[error("Invalid page size: capacity {capacity}, record size {record_size}")]
    InvalidPageSize {
        /// The requested page capacity in bytes.
        capacity: usize,
        /// The requested record size in bytes.
        record_size: usize,
    },
    /// The page has no room for another record.
    #[error("No space")]
    NoSpace,
    /// The page holds no records.
    #[error("No records")]
    NoRecords,
    /// No record in the page matches the payload.
    #[error("Record not found")]
    RecordNotFound,
    /// Memory for the page could not be allocated.
    #[error("Memory limit")]
    MemoryLimit,
}

/// A specialized [`Result`] type returned by PackDB.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::NoSpace.to_string(), "No space");
        assert_eq!(Error::RecordNotFound.to_string(), "Record not found");
        assert_eq!(Error::MemoryLimit.to_string(), "Memory limit");
        assert_eq!(
            Error::InvalidPageSize {
                capacity: 50,
                record_size: 8
            }
            .to_string(),
            "Invalid page size: capacity 50, record size 8"
        );
    }
}
