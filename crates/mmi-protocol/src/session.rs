//! Per-session, per-stream fragment reassembly.
//!
//! The source keeps a singly-linked list of session nodes, each holding
//! four `(ptr, len)` pairs scanned linearly and switched on by tag. This
//! rewrite keys a `HashMap` by [`SessionNumber`] (lookup matters at
//! fragment rate even though the protocol never has more than a few dozen
//! concurrent sessions) and replaces the four parallel fields with an
//! array indexed by [`Stream`], per the design notes.

use std::collections::HashMap;

use mmi_core::{Error, Result, SessionNumber, Stream};

/// Result of feeding one fragment into the Defragmenter.
///
/// Mirrors the source's three-way (not-complete / borrowed / owned)
/// return, but as a tagged enum so the lifetime of the borrowed case is
/// explicit rather than implied by a freestanding pointer the caller must
/// remember to free only sometimes.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// More fragments are expected; nothing is ready for the parser yet.
    Pending,
    /// Reassembly is complete and required no allocation — this is the
    /// single-fragment case (a lone `*_LAST`), and `input` itself is the
    /// whole message.
    Borrowed(&'a [u8]),
    /// Reassembly is complete and concatenated a buffered prefix with the
    /// final fragment into a new allocation.
    Owned(Vec<u8>),
}

#[derive(Debug, Default)]
struct SessionEntry {
    menu: Vec<u8>,
    list: Vec<u8>,
    subtitle_segment: Vec<u8>,
    subtitle_download: Vec<u8>,
}

impl SessionEntry {
    fn buffer_mut(&mut self, stream: Stream) -> &mut Vec<u8> {
        match stream {
            Stream::Menu => &mut self.menu,
            Stream::List => &mut self.list,
            Stream::SubtitleSegment => &mut self.subtitle_segment,
            Stream::SubtitleDownload => &mut self.subtitle_download,
        }
    }
}

/// The session table: one [`SessionEntry`] per open session, behind
/// whatever lock the owning [`crate::MmiResource`] uses.
///
/// Not thread-safe on its own — callers serialize access the same way the
/// source serializes it, with a single mutex shared with the callback
/// registry.
#[derive(Debug)]
pub struct SessionTable {
    sessions: HashMap<SessionNumber, SessionEntry>,
    max_fragment_bytes: usize,
}

impl SessionTable {
    #[must_use]
    pub fn new(max_fragment_bytes: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_fragment_bytes,
        }
    }

    /// Feeds one fragment of `stream` for `session` into the reassembly
    /// buffer. `is_last` distinguishes a `*_MORE` continuation from the
    /// terminating `*_LAST`.
    pub fn defragment<'a>(
        &mut self,
        session: SessionNumber,
        stream: Stream,
        is_last: bool,
        input: &'a [u8],
    ) -> Result<Outcome<'a>> {
        if !is_last {
            let entry = self.sessions.entry(session).or_default();
            let buffer = entry.buffer_mut(stream);
            if buffer.len() + input.len() > self.max_fragment_bytes {
                return Err(Error::FragmentOverflow {
                    session: session.as_u16(),
                    stream,
                    cap: self.max_fragment_bytes,
                });
            }
            buffer.extend_from_slice(input);
            return Ok(Outcome::Pending);
        }

        // Terminating fragment: only allocate if a preceding `*_MORE` left
        // something buffered. A bare `*_LAST` is the common case and must
        // not cost an allocation.
        let Some(entry) = self.sessions.get_mut(&session) else {
            return Ok(Outcome::Borrowed(input));
        };
        let buffer = entry.buffer_mut(stream);
        if buffer.is_empty() {
            return Ok(Outcome::Borrowed(input));
        }
        if buffer.len() + input.len() > self.max_fragment_bytes {
            return Err(Error::FragmentOverflow {
                session: session.as_u16(),
                stream,
                cap: self.max_fragment_bytes,
            });
        }
        buffer.extend_from_slice(input);
        Ok(Outcome::Owned(std::mem::take(buffer)))
    }

    /// Removes `session`'s entry entirely, freeing all four of its
    /// fragment buffers. A no-op if the session has no entry (nothing was
    /// ever fragmented for it).
    pub fn clear_session(&mut self, session: SessionNumber) {
        self.sessions.remove(&session);
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    fn buffered_len(&self, session: SessionNumber, stream: Stream) -> usize {
        self.sessions
            .get(&session)
            .map(|e| match stream {
                Stream::Menu => e.menu.len(),
                Stream::List => e.list.len(),
                Stream::SubtitleSegment => e.subtitle_segment.len(),
                Stream::SubtitleDownload => e.subtitle_download.len(),
            })
            .unwrap_or(0)
    }
}
