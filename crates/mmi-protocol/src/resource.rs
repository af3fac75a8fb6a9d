//! The MMI Resource: the one public object this core exposes.
//!
//! Ties the Dispatcher, Session Table, and Callback Registry together
//! behind a single [`parking_lot::Mutex`], per §5's locking discipline.
//! Encoders are exposed as thin delegating methods so an application holds
//! one object for both directions of traffic, the way the source's
//! `en50221_app_mmi_*` free functions all operate on one resource handle.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error};

use mmi_core::{Error, Result, SessionNumber, SlotId, Stream, Tag};

use crate::asn1::decode_length;
use crate::callbacks::{MmiCallbacks, NullCallbacks};
use crate::config::ResourceConfig;
use crate::encoders::{self, DisplayReplyPayload};
use crate::parsers;
use crate::send::SendInterface;
use crate::session::{Outcome, SessionTable};

struct Inner {
    sessions: SessionTable,
    callbacks: Arc<dyn MmiCallbacks>,
}

/// The MMI application resource.
///
/// `deliver` is called by the session layer on whatever thread owns the
/// transport read loop; the encoder methods and `register_callbacks`/
/// `clear_session` may be called concurrently from application threads.
/// See the crate-level concurrency notes for the exact locking discipline.
pub struct MmiResource {
    send: Arc<dyn SendInterface>,
    inner: Mutex<Inner>,
}

impl MmiResource {
    #[must_use]
    pub fn new(send: Arc<dyn SendInterface>, config: ResourceConfig) -> Self {
        Self {
            send,
            inner: Mutex::new(Inner {
                sessions: SessionTable::new(config.max_fragment_bytes()),
                callbacks: Arc::new(NullCallbacks),
            }),
        }
    }

    /// Installs the single capability object that receives every incoming
    /// object class from now on. Swaps the whole `Arc` under the lock; a
    /// `deliver` racing this call observes either the old or the new
    /// callbacks, never a mix of the two.
    pub fn register_callbacks(&self, callbacks: Arc<dyn MmiCallbacks>) {
        self.inner.lock().callbacks = callbacks;
    }

    /// Removes `session`'s fragment-reassembly state. The lock is released
    /// by ordinary guard drop on every path — including the path where a
    /// matching entry was found and removed — which is what rules out the
    /// source's unlock-on-early-return bug by construction.
    pub fn clear_session(&self, session: SessionNumber) {
        self.inner.lock().sessions.clear_session(session);
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.session_count()
    }

    fn callbacks(&self) -> Arc<dyn MmiCallbacks> {
        self.inner.lock().callbacks.clone()
    }

    /// Entry point called by the session layer with a whole application
    /// PDU, starting at the 3-byte object tag.
    pub fn deliver(
        &self,
        slot: SlotId,
        session: SessionNumber,
        _resource_id: u32,
        bytes: &[u8],
    ) -> Result<i32> {
        if bytes.len() < 3 {
            return Err(Error::ShortData {
                needed: 3,
                available: bytes.len(),
            });
        }
        let tag_raw = u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]);
        let tag = Tag::from_u32(tag_raw).ok_or(Error::UnexpectedTag { tag: tag_raw })?;
        let body = &bytes[3..];

        debug!(session = session.as_u16(), tag = format!("{tag:?}"), "dispatching MMI object");

        let result = if let Some(stream) = tag.stream() {
            self.deliver_fragmentable(slot, session, tag, stream, body)
        } else {
            self.deliver_fixed(slot, session, tag, tag_raw, body)
        };

        if let Err(ref err) = result {
            error!(session = session.as_u16(), tag = format!("{tag:?}"), %err, "MMI object parse failed");
        }
        result
    }

    fn deliver_fixed(
        &self,
        slot: SlotId,
        session: SessionNumber,
        tag: Tag,
        tag_raw: u32,
        body: &[u8],
    ) -> Result<i32> {
        let cb = self.callbacks();
        let cb = cb.as_ref();
        match tag {
            Tag::CloseMmi => parsers::parse_close(slot, session, body, cb),
            Tag::DisplayControl => parsers::parse_display_control(slot, session, body, cb),
            Tag::KeypadControl => parsers::parse_keypad_control(slot, session, body, cb),
            Tag::Enq => parsers::parse_enq(slot, session, body, cb),
            Tag::SceneEndMark => parsers::parse_scene_end_mark(slot, session, body, cb),
            Tag::SceneControl => parsers::parse_scene_control(slot, session, body, cb),
            Tag::FlushDownload => parsers::parse_flush_download(slot, session, body, cb),
            // Outgoing-only objects (display_reply, keypress, answ, menu_answ,
            // display_message, scene_done, download_reply) and the nested-only
            // text tags are not valid as a top-level incoming dispatch.
            _ => Err(Error::UnexpectedTag { tag: tag_raw }),
        }
    }

    fn deliver_fragmentable(
        &self,
        slot: SlotId,
        session: SessionNumber,
        tag: Tag,
        stream: Stream,
        body: &[u8],
    ) -> Result<i32> {
        let (len, len_field_len) = decode_length(body)?;
        let rest = &body[len_field_len..];
        let len = len as usize;
        let fragment = rest.get(..len).ok_or(Error::ShortData {
            needed: len,
            available: rest.len(),
        })?;

        let (outcome, cb) = {
            let mut inner = self.inner.lock();
            let outcome = inner.sessions.defragment(session, stream, tag.is_last(), fragment)?;
            (outcome, inner.callbacks.clone())
        };

        let payload: &[u8] = match &outcome {
            Outcome::Pending => {
                debug!(session = session.as_u16(), tag = format!("{tag:?}"), "fragment buffered");
                return Ok(0);
            }
            Outcome::Borrowed(b) => b,
            Outcome::Owned(v) => v.as_slice(),
        };

        match tag {
            Tag::MenuLast => parsers::parse_menu_or_list(true, slot, session, payload, cb.as_ref()),
            Tag::ListLast => parsers::parse_menu_or_list(false, slot, session, payload, cb.as_ref()),
            Tag::SubtitleSegmentLast => {
                parsers::parse_subtitle(true, slot, session, payload, cb.as_ref())
            }
            Tag::SubtitleDownloadLast => {
                parsers::parse_subtitle(false, slot, session, payload, cb.as_ref())
            }
            _ => unreachable!("a non-terminal fragment always returns Outcome::Pending above"),
        }
    }

    // -- Encoders -----------------------------------------------------

    pub fn close(&self, session: SessionNumber, cmd_id: u8, delay: u8) -> Result<usize> {
        encoders::close(self.send.as_ref(), session, cmd_id, delay)
    }

    pub fn display_reply(
        &self,
        session: SessionNumber,
        payload: &DisplayReplyPayload<'_>,
    ) -> Result<usize> {
        encoders::display_reply(self.send.as_ref(), session, payload)
    }

    pub fn keypress(&self, session: SessionNumber, keycode: u8) -> Result<usize> {
        encoders::keypress(self.send.as_ref(), session, keycode)
    }

    pub fn display_message(&self, session: SessionNumber, id: u8) -> Result<usize> {
        encoders::display_message(self.send.as_ref(), session, id)
    }

    pub fn answ(&self, session: SessionNumber, answ_id: u8, text: &[u8]) -> Result<usize> {
        encoders::answ(self.send.as_ref(), session, answ_id, text)
    }

    pub fn menu_answ(&self, session: SessionNumber, choice: u8) -> Result<usize> {
        encoders::menu_answ(self.send.as_ref(), session, choice)
    }

    pub fn scene_done(
        &self,
        session: SessionNumber,
        decoder_continue: bool,
        scene_reveal: bool,
        scene_tag: u8,
    ) -> Result<usize> {
        encoders::scene_done(self.send.as_ref(), session, decoder_continue, scene_reveal, scene_tag)
    }

    pub fn download_reply(
        &self,
        session: SessionNumber,
        object_id: u16,
        reply_id: u8,
    ) -> Result<usize> {
        encoders::download_reply(self.send.as_ref(), session, object_id, reply_id)
    }
}
