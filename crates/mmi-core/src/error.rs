use thiserror::Error;

/// The six failure modes the MMI resource can report.
///
/// Every variant here corresponds to a distinct parse, allocation, or I/O
/// defect described in the EN 50221 MMI resource; there is deliberately no
/// catch-all variant. A parser that hits a case not covered here is itself
/// a bug, not something to route through a generic error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("short data: need at least {needed} bytes, got {available}")]
    ShortData { needed: usize, available: usize },

    #[error("unexpected tag: 0x{tag:06X}")]
    UnexpectedTag { tag: u32 },

    #[error("malformed ASN.1 length prefix")]
    MalformedLength,

    #[error("fragment buffer exceeded cap of {cap} bytes (session {session}, stream {stream:?})")]
    FragmentOverflow {
        session: u16,
        stream: crate::Stream,
        cap: usize,
    },

    #[error("out of memory")]
    OutOfMemory,

    #[error("send interface error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
