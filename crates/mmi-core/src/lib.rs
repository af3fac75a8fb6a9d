pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{SessionNumber, SlotId, Stream, Tag};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
