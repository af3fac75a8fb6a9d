//! The single capability object an application registers to receive
//! incoming MMI objects.
//!
//! The original C core exposes eleven independent `register_*_callback`
//! entry points, each a raw function pointer plus an opaque argument,
//! guarded by the same mutex as the session table. This rewrite collapses
//! that into one object-safe trait: registration becomes a single `Arc`
//! swap under the lock (see [`crate::MmiResource::register_callbacks`]),
//! and a caller that only cares about menus implements one method instead
//! of building eleven `(fn, arg)` pairs by hand.
//!
//! Every method has a default no-op body, mirroring the original's
//! "callback may be null" behavior — an unset callback silently returns 0,
//! observed by the session layer as "handled, no application reaction".
//!
//! # Thread safety
//!
//! Methods are invoked from whichever thread called [`crate::MmiResource::deliver`],
//! with the resource's internal lock already released (see the concurrency
//! notes on [`crate::MmiResource`]). Implementations must be `Send + Sync`,
//! must not block indefinitely, and are explicitly permitted to call back
//! into the same `MmiResource` (e.g. to send a reply) without deadlocking.

use mmi_core::{SessionNumber, SlotId};

/// A text string extracted from a menu/list payload by the Text Defragmenter.
///
/// `Borrowed` is a zero-copy view into the payload the dispatcher was
/// handed (the common case: a single `TEXT_LAST` fragment). `Owned` is
/// returned when the string was assembled from more than one `TEXT_MORE`
/// fragment and therefore required an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextField<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl<'a> TextField<'a> {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TextField::Borrowed(b) => b,
            TextField::Owned(v) => v,
        }
    }

    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self, TextField::Owned(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Incoming-object callbacks, one method per tag the session layer can
/// deliver to this core.
pub trait MmiCallbacks: Send + Sync {
    fn on_close(&self, _slot: SlotId, _session: SessionNumber, _cmd_id: u8, _delay: u8) -> i32 {
        0
    }

    fn on_display_control(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _cmd_id: u8,
        _mmi_mode: u8,
    ) -> i32 {
        0
    }

    fn on_keypad_control(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _cmd_id: u8,
        _keycodes: &[u8],
    ) -> i32 {
        0
    }

    fn on_enq(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _blind_answer: bool,
        _answer_length: u8,
        _text: &[u8],
    ) -> i32 {
        0
    }

    #[allow(clippy::too_many_arguments)]
    fn on_menu(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _title: &TextField<'_>,
        _subtitle: &TextField<'_>,
        _bottom: &TextField<'_>,
        _items: &[TextField<'_>],
        _items_raw: &[u8],
    ) -> i32 {
        0
    }

    #[allow(clippy::too_many_arguments)]
    fn on_list(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _title: &TextField<'_>,
        _subtitle: &TextField<'_>,
        _bottom: &TextField<'_>,
        _items: &[TextField<'_>],
        _items_raw: &[u8],
    ) -> i32 {
        0
    }

    fn on_subtitle_segment(&self, _slot: SlotId, _session: SessionNumber, _data: &[u8]) -> i32 {
        0
    }

    fn on_subtitle_download(&self, _slot: SlotId, _session: SessionNumber, _data: &[u8]) -> i32 {
        0
    }

    fn on_scene_end_mark(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _decoder_continue: bool,
        _scene_reveal: bool,
        _send_scene_done: bool,
        _scene_tag: u8,
    ) -> i32 {
        0
    }

    fn on_scene_control(
        &self,
        _slot: SlotId,
        _session: SessionNumber,
        _decoder_continue: bool,
        _scene_reveal: bool,
        _scene_tag: u8,
    ) -> i32 {
        0
    }

    fn on_flush_download(&self, _slot: SlotId, _session: SessionNumber) -> i32 {
        0
    }
}

/// A callback object that ignores every event; the resource's default
/// before `register_callbacks` is ever called.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCallbacks;

impl MmiCallbacks for NullCallbacks {}
