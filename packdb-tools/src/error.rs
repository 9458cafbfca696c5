use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("Page {0}")]
    Page(#[from] packdb::Error),
    #[error("Mismatch at operation {op}: {msg}")]
    Mismatch { op: u64, msg: String },
    #[error("Histogram {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
