//! The eight outgoing objects.
//!
//! Every encoder builds a `tag(3) + length(ASN.1) + payload` frame and hands
//! it to [`SendInterface`]. None hold the resource's lock — see the
//! concurrency notes on [`crate::MmiResource`] — so these are free
//! functions taking the send interface by reference rather than methods
//! that would tempt a caller into locking around them.

use mmi_core::{Result, SessionNumber, Tag};

use crate::asn1::{encode_length, encode_length_into};
use crate::constants::ANSW_ID_ANSWER;
use crate::send::SendInterface;

fn tag_bytes(tag: Tag) -> [u8; 3] {
    let v = tag.as_u32();
    [(v >> 16) as u8, (v >> 8) as u8, v as u8]
}

fn send_framed(
    send: &dyn SendInterface,
    session: SessionNumber,
    tag: Tag,
    body: &[u8],
) -> Result<usize> {
    let mut out = Vec::with_capacity(3 + 5 + body.len());
    out.extend_from_slice(&tag_bytes(tag));
    encode_length_into(body.len() as u32, &mut out);
    out.extend_from_slice(body);
    send.send_data(session, &out)
}

fn send_framed_vectored(
    send: &dyn SendInterface,
    session: SessionNumber,
    tag: Tag,
    chunks: &[&[u8]],
) -> Result<usize> {
    let total: usize = chunks.iter().map(|c| c.len()).sum();
    let tag_buf = tag_bytes(tag);
    let mut len_buf = [0u8; 5];
    let len_n = encode_length(total as u32, &mut len_buf)?;

    let mut all: Vec<&[u8]> = Vec::with_capacity(2 + chunks.len());
    all.push(&tag_buf);
    all.push(&len_buf[..len_n]);
    all.extend_from_slice(chunks);
    send.send_datav(session, &all)
}

/// `close(session, cmd_id, delay)` — one body byte, or two when `cmd_id`
/// is the delay variant (see [`crate::constants::CLOSE_CMD_ID_DELAY`]).
pub fn close(send: &dyn SendInterface, session: SessionNumber, cmd_id: u8, delay: u8) -> Result<usize> {
    use crate::constants::CLOSE_CMD_ID_DELAY;
    let body: &[u8] = if cmd_id == CLOSE_CMD_ID_DELAY {
        &[cmd_id, delay]
    } else {
        &[cmd_id]
    };
    send_framed(send, session, Tag::CloseMmi, body)
}

/// `keypress(session, keycode)` — fixed 5-byte frame.
pub fn keypress(send: &dyn SendInterface, session: SessionNumber, keycode: u8) -> Result<usize> {
    send_framed(send, session, Tag::Keypress, &[keycode])
}

/// `display_message(session, id)` — fixed 5-byte frame.
pub fn display_message(send: &dyn SendInterface, session: SessionNumber, id: u8) -> Result<usize> {
    send_framed(send, session, Tag::DisplayMessage, &[id])
}

/// `answ(session, answ_id, text)` — the answer variant carries `text`,
/// cancel (or any other id) carries only the id.
pub fn answ(
    send: &dyn SendInterface,
    session: SessionNumber,
    answ_id: u8,
    text: &[u8],
) -> Result<usize> {
    if answ_id == ANSW_ID_ANSWER {
        send_framed_vectored(send, session, Tag::Answ, &[&[answ_id], text])
    } else {
        send_framed(send, session, Tag::Answ, &[answ_id])
    }
}

/// `menu_answ(session, choice)` — fixed 5-byte frame.
pub fn menu_answ(send: &dyn SendInterface, session: SessionNumber, choice: u8) -> Result<usize> {
    send_framed(send, session, Tag::MenuAnsw, &[choice])
}

/// `scene_done(session, decoder_continue, scene_reveal, scene_tag)` — single
/// flag byte: bit 7, bit 6, low nibble.
pub fn scene_done(
    send: &dyn SendInterface,
    session: SessionNumber,
    decoder_continue: bool,
    scene_reveal: bool,
    scene_tag: u8,
) -> Result<usize> {
    let flags = (u8::from(decoder_continue) << 7) | (u8::from(scene_reveal) << 6) | (scene_tag & 0x0F);
    send_framed(send, session, Tag::SceneDone, &[flags])
}

/// `download_reply(session, object_id, reply_id)` — 7-byte frame: the length
/// byte is always the literal value 3.
pub fn download_reply(
    send: &dyn SendInterface,
    session: SessionNumber,
    object_id: u16,
    reply_id: u8,
) -> Result<usize> {
    let be = object_id.to_be_bytes();
    send_framed(send, session, Tag::DownloadReply, &[be[0], be[1], reply_id])
}

/// One pixel-depth record inside a graphics characteristics reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDepth {
    /// 3 bits.
    pub display_depth: u8,
    /// 3 bits.
    pub pixels_per_byte: u8,
    /// 8 bits, carried verbatim.
    pub region_overhead: u8,
}

/// Payload for `display_reply`'s `LIST_*_GFX_CHARACTERISTICS` variants.
///
/// `display_bytes`/`composition_buffer_bytes`/`object_cache_bytes` are
/// declared `u16` for caller convenience, but only `display_bytes` actually
/// reaches the wire at full 12-bit width; the other two are truncated to 8
/// bits by [`pack_byte_counts`] — see the module's bit layout note and
/// §4.6 for why this asymmetry is preserved rather than fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GfxCharacteristics<'a> {
    /// 4 bits.
    pub aspect_ratio: u8,
    /// 3 bits.
    pub gfx_relation_to_video: u8,
    pub multiple_depths: bool,
    pub width: u16,
    pub height: u16,
    pub display_bytes: u16,
    pub composition_buffer_bytes: u16,
    pub object_cache_bytes: u16,
    pub pixel_depths: &'a [PixelDepth],
}

/// Packs `display_bytes` (12 bits), `composition_buffer_bytes` (8 bits,
/// truncated), `object_cache_bytes` (8 bits, truncated), and
/// `num_pixel_depths` (4 bits) into the four nibble-aligned bytes specified
/// in §4.6. This asymmetry — one 12-bit field and two 8-bit fields sharing
/// what looks like three equal 12-bit slots — is deliberate wire
/// compatibility, not a bug to widen away.
fn pack_byte_counts(
    display_bytes: u16,
    composition_buffer_bytes: u16,
    object_cache_bytes: u16,
    num_pixel_depths: u8,
) -> [u8; 4] {
    let b0 = ((display_bytes >> 4) & 0xFF) as u8;
    let b1 = (((display_bytes & 0x0F) << 4) | ((composition_buffer_bytes >> 4) & 0x0F)) as u8;
    let b2 = (((composition_buffer_bytes & 0x0F) << 4) | ((object_cache_bytes >> 4) & 0x0F)) as u8;
    let b3 = (((object_cache_bytes & 0x0F) << 4) | (u16::from(num_pixel_depths) & 0x0F)) as u8;
    [b0, b1, b2, b3]
}

impl GfxCharacteristics<'_> {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(9 + 2 * self.pixel_depths.len());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        let flags = ((self.aspect_ratio & 0x0F) << 4)
            | ((self.gfx_relation_to_video & 0x07) << 1)
            | u8::from(self.multiple_depths);
        out.push(flags);
        out.extend_from_slice(&pack_byte_counts(
            self.display_bytes,
            self.composition_buffer_bytes,
            self.object_cache_bytes,
            self.pixel_depths.len() as u8,
        ));
        for pd in self.pixel_depths {
            let byte0 = ((pd.display_depth & 0x07) << 5) | ((pd.pixels_per_byte & 0x07) << 2);
            out.push(byte0);
            out.push(pd.region_overhead);
        }
        out
    }
}

/// The shape `display_reply`'s payload takes, selected by `reply_id`.
///
/// The graphics-characteristics variant does not re-transmit `reply_id` in
/// its payload — the CAM already knows which of the two GFX queries it
/// asked, via the preceding `display_control` command id — matching the
/// source's framing for this reply exactly.
pub enum DisplayReplyPayload<'a> {
    ModeAck { reply_id: u8, mode: u8 },
    CharTableList { reply_id: u8, table: &'a [u8] },
    GfxCharacteristics(GfxCharacteristics<'a>),
    IdOnly { reply_id: u8 },
}

/// `display_reply(session, payload)`.
pub fn display_reply(
    send: &dyn SendInterface,
    session: SessionNumber,
    payload: &DisplayReplyPayload<'_>,
) -> Result<usize> {
    match payload {
        DisplayReplyPayload::ModeAck { reply_id, mode } => {
            send_framed(send, session, Tag::DisplayReply, &[*reply_id, *mode])
        }
        DisplayReplyPayload::CharTableList { reply_id, table } => {
            send_framed_vectored(send, session, Tag::DisplayReply, &[&[*reply_id], table])
        }
        DisplayReplyPayload::GfxCharacteristics(gfx) => {
            send_framed(send, session, Tag::DisplayReply, &gfx.encode())
        }
        DisplayReplyPayload::IdOnly { reply_id } => {
            send_framed(send, session, Tag::DisplayReply, &[*reply_id])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ANSW_ID_CANCEL;
    use crate::send::test_support::RecordingSend;

    fn session() -> SessionNumber {
        SessionNumber::new(0x1234)
    }

    #[test]
    fn close_immediate_is_one_byte_body() {
        let send = RecordingSend::default();
        close(&send, session(), 0x00, 0x00).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn close_delay_is_two_byte_body() {
        let send = RecordingSend::default();
        close(&send, session(), 0x01, 0x05).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x00, 0x02, 0x01, 0x05]);
    }

    #[test]
    fn keypress_matches_scenario_3() {
        let send = RecordingSend::default();
        keypress(&send, SessionNumber::new(0x1234), 0x20).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x06, 0x01, 0x20]);
    }

    #[test]
    fn answ_cancel_carries_only_id() {
        let send = RecordingSend::default();
        answ(&send, session(), ANSW_ID_CANCEL, b"ignored").unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x08, 0x01, 0x00]);
    }

    #[test]
    fn answ_answer_carries_text() {
        let send = RecordingSend::default();
        answ(&send, session(), ANSW_ID_ANSWER, b"42").unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x08, 0x03, 0x01, b'4', b'2']);
    }

    #[test]
    fn display_message_is_five_bytes() {
        let send = RecordingSend::default();
        display_message(&send, session(), 0x03).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x10, 0x01, 0x03]);
    }

    #[test]
    fn menu_answ_is_five_bytes() {
        let send = RecordingSend::default();
        menu_answ(&send, session(), 0x02).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x0B, 0x01, 0x02]);
    }

    #[test]
    fn display_reply_mode_ack_carries_one_mode_byte() {
        let send = RecordingSend::default();
        display_reply(
            &send,
            session(),
            &DisplayReplyPayload::ModeAck { reply_id: 0x00, mode: 0x01 },
        )
        .unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x02, 0x02, 0x00, 0x01]);
    }

    #[test]
    fn display_reply_id_only_carries_no_payload_beyond_the_id() {
        let send = RecordingSend::default();
        display_reply(&send, session(), &DisplayReplyPayload::IdOnly { reply_id: 0xF0 }).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x02, 0x01, 0xF0]);
    }

    #[test]
    fn display_reply_char_table_list_appends_table_bytes() {
        let send = RecordingSend::default();
        display_reply(
            &send,
            session(),
            &DisplayReplyPayload::CharTableList {
                reply_id: 0x01,
                table: &[0xAA, 0xBB, 0xCC],
            },
        )
        .unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x02, 0x04, 0x01, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn scene_done_packs_flags_and_tag() {
        let send = RecordingSend::default();
        scene_done(&send, session(), true, false, 0x07).unwrap();
        let sent = send.sent.lock();
        assert_eq!(sent[0].1, vec![0x9F, 0x88, 0x12, 0x01, 0b1000_0111]);
    }

    #[test]
    fn download_reply_is_seven_bytes_with_literal_length() {
        let send = RecordingSend::default();
        download_reply(&send, session(), 0xBEEF, 0x02).unwrap();
        let sent = send.sent.lock();
        assert_eq!(
            sent[0].1,
            vec![0x9F, 0x88, 0x17, 0x03, 0xBE, 0xEF, 0x02]
        );
    }

    // Scenario 5: display_reply graphics characteristics, pixel depths.
    #[test]
    fn gfx_characteristics_matches_scenario_5() {
        let pixel_depths = [PixelDepth {
            display_depth: 4,
            pixels_per_byte: 2,
            region_overhead: 0x10,
        }];
        let gfx = GfxCharacteristics {
            aspect_ratio: 1,
            gfx_relation_to_video: 0,
            multiple_depths: false,
            width: 720,
            height: 576,
            display_bytes: 4096,
            composition_buffer_bytes: 2048,
            object_cache_bytes: 1024,
            pixel_depths: &pixel_depths,
        };
        let send = RecordingSend::default();
        display_reply(
            &send,
            session(),
            &DisplayReplyPayload::GfxCharacteristics(gfx),
        )
        .unwrap();
        let sent = send.sent.lock();
        let frame = &sent[0].1;
        assert_eq!(frame[0..3], [0x9F, 0x88, 0x02]);
        assert_eq!(frame[3], 0x0B); // length prefix from the scenario
        let payload = &frame[4..];
        assert_eq!(payload.len(), 0x0B);
        // width, height, then the flags byte — not the flags byte first.
        assert_eq!(&payload[0..2], &720u16.to_be_bytes());
        assert_eq!(&payload[2..4], &576u16.to_be_bytes());
        assert_eq!(payload[4], 0b0001_0000); // aspect_ratio=1, gfx_relation=0, multiple_depths=0
        assert_eq!(&payload[payload.len() - 2..], &[0x88, 0x10]);
    }

    #[test]
    fn byte_count_packing_truncates_comp_and_object_to_eight_bits() {
        // display_bytes keeps all 12 bits; the other two lose their top
        // nibble, per the asymmetric layout this must preserve exactly.
        let packed = pack_byte_counts(0x0FFF, 0x1FFF, 0x2FFF, 0x0F);
        assert_eq!(packed[0], 0xFF); // display_bytes high byte, full 12 bits
        assert_eq!(packed[1] & 0xF0, 0xF0); // display_bytes low nibble
        assert_eq!(packed[1] & 0x0F, 0x0F); // comp_bytes bits 7..4, truncated
        assert_eq!(packed[3] & 0x0F, 0x0F); // num_pixel_depths
    }
}
