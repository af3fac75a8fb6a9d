//! Per-tag object parsers.
//!
//! Split into three families, matching the source and §4.2–§4.3 of the
//! design: fixed-length parsers that read a single length byte and a
//! constant-shape body, two long-form parsers with a variable tail, and the
//! fragmentable parsers that hand off to [`crate::session::SessionTable`]
//! and [`crate::text`] before invoking a callback. The fragmentable ones
//! take an already-reassembled payload — [`crate::MmiResource::deliver`]
//! owns the locking around the Defragmenter, these functions never see the
//! lock.

use mmi_core::{Error, Result, SessionNumber, SlotId};

use crate::asn1::decode_length;
use crate::callbacks::{MmiCallbacks, TextField};
use crate::constants::{CLOSE_CMD_ID_DELAY, DISPLAY_CONTROL_CMD_ID_SET_MMI_MODE};
use crate::text::defragment_text;

fn short_form_payload(body: &[u8]) -> Result<&[u8]> {
    let (len, len_field_len) = decode_length(body)?;
    let rest = &body[len_field_len..];
    let len = len as usize;
    rest.get(..len).ok_or(Error::ShortData {
        needed: len,
        available: rest.len(),
    })
}

pub fn parse_close(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    let payload = short_form_payload(body)?;
    let &cmd_id = payload.first().ok_or(Error::ShortData {
        needed: 1,
        available: 0,
    })?;
    let delay = if cmd_id == CLOSE_CMD_ID_DELAY {
        if payload.len() != 2 {
            return Err(Error::ShortData {
                needed: 2,
                available: payload.len(),
            });
        }
        payload[1]
    } else {
        0
    };
    Ok(cb.on_close(slot, session, cmd_id, delay))
}

pub fn parse_display_control(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    let payload = short_form_payload(body)?;
    let &cmd_id = payload.first().ok_or(Error::ShortData {
        needed: 1,
        available: 0,
    })?;
    let mmi_mode = if cmd_id == DISPLAY_CONTROL_CMD_ID_SET_MMI_MODE {
        if payload.len() != 2 {
            return Err(Error::ShortData {
                needed: 2,
                available: payload.len(),
            });
        }
        payload[1]
    } else {
        0
    };
    Ok(cb.on_display_control(slot, session, cmd_id, mmi_mode))
}

/// Decomposes the flags byte shared by `scene_end_mark` and `scene_control`:
/// bit 7 = decoder_continue, bit 6 = scene_reveal, bit 5 = send_scene_done
/// (meaningful for `scene_end_mark` only), bits 3..0 = scene_tag.
fn scene_flags(flags: u8) -> (bool, bool, bool, u8) {
    (
        flags & 0x80 != 0,
        flags & 0x40 != 0,
        flags & 0x20 != 0,
        flags & 0x0F,
    )
}

/// `scene_end_mark` / `scene_control` do not ASN.1-decode their length: the
/// source checks the PDU is exactly two bytes and that the first is the
/// literal value 1, never consulting the general BER decoder for it.
pub fn parse_scene_end_mark(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    if body.len() != 2 || body[0] != 1 {
        return Err(Error::ShortData {
            needed: 2,
            available: body.len(),
        });
    }
    let (decoder_continue, scene_reveal, send_scene_done, scene_tag) = scene_flags(body[1]);
    Ok(cb.on_scene_end_mark(
        slot,
        session,
        decoder_continue,
        scene_reveal,
        send_scene_done,
        scene_tag,
    ))
}

pub fn parse_scene_control(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    if body.len() != 2 || body[0] != 1 {
        return Err(Error::ShortData {
            needed: 2,
            available: body.len(),
        });
    }
    let (decoder_continue, scene_reveal, _, scene_tag) = scene_flags(body[1]);
    Ok(cb.on_scene_control(slot, session, decoder_continue, scene_reveal, scene_tag))
}

/// `flush_download`'s body is an empty ASN.1 payload: a single length byte
/// fixed at `0x00` and no content byte at all.
pub fn parse_flush_download(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    if body.len() != 1 || body[0] != 0x00 {
        return Err(Error::ShortData {
            needed: 1,
            available: body.len(),
        });
    }
    Ok(cb.on_flush_download(slot, session))
}

pub fn parse_enq(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    let payload = short_form_payload(body)?;
    if payload.len() < 2 {
        return Err(Error::ShortData {
            needed: 2,
            available: payload.len(),
        });
    }
    let blind_answer = payload[0] & 0x01 != 0;
    let answer_length = payload[1];
    let text = &payload[2..];
    Ok(cb.on_enq(slot, session, blind_answer, answer_length, text))
}

pub fn parse_keypad_control(
    slot: SlotId,
    session: SessionNumber,
    body: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    let payload = short_form_payload(body)?;
    let &cmd_id = payload.first().ok_or(Error::ShortData {
        needed: 1,
        available: 0,
    })?;
    let keycodes = &payload[1..];
    Ok(cb.on_keypad_control(slot, session, cmd_id, keycodes))
}

/// Parses a reassembled `menu_last`/`list_last` payload: `choice_nb`
/// followed by title, subtitle, and bottom text strings, then either
/// `choice_nb` item strings or — when `choice_nb == 0xFF` — a raw items
/// blob consumed verbatim instead of being walked as text records.
pub fn parse_menu_or_list(
    is_menu: bool,
    slot: SlotId,
    session: SessionNumber,
    payload: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    let &choice_nb = payload.first().ok_or(Error::ShortData {
        needed: 1,
        available: 0,
    })?;
    let raw_items = choice_nb == 0xFF;
    let text_count = if raw_items { 3 } else { choice_nb as usize + 3 };

    let mut cursor = &payload[1..];
    let mut texts: Vec<TextField<'_>> = Vec::with_capacity(text_count);
    for _ in 0..text_count {
        let (field, consumed) = defragment_text(cursor)?;
        texts.push(field);
        cursor = &cursor[consumed..];
    }

    let items = texts.split_off(3);
    let mut title_fields = texts.into_iter();
    let title = title_fields.next().expect("text_count >= 3");
    let subtitle = title_fields.next().expect("text_count >= 3");
    let bottom = title_fields.next().expect("text_count >= 3");
    let items_raw: &[u8] = if raw_items { cursor } else { &[] };

    let result = if is_menu {
        cb.on_menu(slot, session, &title, &subtitle, &bottom, &items, items_raw)
    } else {
        cb.on_list(slot, session, &title, &subtitle, &bottom, &items, items_raw)
    };
    Ok(result)
}

/// Delivers a reassembled `subtitle_segment_last`/`subtitle_download_last`
/// payload verbatim — no further structure is imposed on it by this core.
pub fn parse_subtitle(
    is_segment: bool,
    slot: SlotId,
    session: SessionNumber,
    payload: &[u8],
    cb: &dyn MmiCallbacks,
) -> Result<i32> {
    Ok(if is_segment {
        cb.on_subtitle_segment(slot, session, payload)
    } else {
        cb.on_subtitle_download(slot, session, payload)
    })
}
