//! The boundary below which this core does not go.
//!
//! The session/transport layers own framing the result onto the Common
//! Interface; this core only ever calls [`SendInterface::send_data`] or
//! [`SendInterface::send_datav`] with a complete application PDU.

use mmi_core::{Error, Result, SessionNumber};

/// Supplied by the caller at [`crate::MmiResource::new`] time.
///
/// Implementations are expected to be independently thread-safe: encoders
/// never hold the resource's internal lock while calling through this
/// trait (see the concurrency notes on [`crate::MmiResource`]).
pub trait SendInterface: Send + Sync {
    /// Sends a single contiguous PDU on `session`. Returns the number of
    /// bytes written.
    fn send_data(&self, session: SessionNumber, bytes: &[u8]) -> Result<usize>;

    /// Sends a PDU assembled from multiple chunks without requiring the
    /// caller to concatenate them first — used by encoders whose payload
    /// is a fixed header plus a variable-length tail (e.g. `display_reply`
    /// with a character table, or `answ` with response text).
    ///
    /// The default implementation concatenates and calls [`Self::send_data`];
    /// implementations that can write vectored I/O directly should override
    /// it to avoid the copy.
    fn send_datav(&self, session: SessionNumber, chunks: &[&[u8]]) -> Result<usize> {
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        let mut buf = Vec::with_capacity(total);
        for chunk in chunks {
            buf.extend_from_slice(chunk);
        }
        self.send_data(session, &buf)
    }
}

/// Maps a transport-level I/O failure into this core's error taxonomy.
///
/// Send interface implementations backed by `std::io` use this at their
/// boundary so the core only ever sees [`mmi_core::Error::IoError`].
pub fn io_error(err: impl std::fmt::Display) -> Error {
    Error::IoError(err.to_string())
}
