//! Nested text-string defragmentation inside a reassembled menu/list payload.
//!
//! A menu/list title, subtitle, bottom line, or item is itself encoded as a
//! chain of `TEXT_MORE* TEXT_LAST` records — a second, independent level of
//! fragmentation nested inside the outer per-session/per-stream one in
//! [`crate::session`]. Unlike the outer Defragmenter this one is stateless
//! across calls: it consumes exactly one text string from the front of a
//! cursor and reports how many bytes it used, so the caller can walk a
//! sequence of them (title, subtitle, bottom, then N items).
//!
//! The source does not bounds-check a record's declared length against the
//! bytes actually remaining before indexing into them — harmless in C only
//! because a malformed length there reads adjacent heap memory instead of
//! crashing outright. This rewrite checks it and reports
//! [`mmi_core::Error::MalformedLength`] instead, which changes a latent
//! out-of-bounds read into a normal parse error without changing any
//! behavior for well-formed input.

use mmi_core::{Error, Result, Tag};

use crate::asn1::decode_length;
use crate::callbacks::TextField;

/// Extracts one text string from the front of `data`.
///
/// Returns the extracted [`TextField`] and the number of bytes consumed
/// from `data` (the caller advances its own cursor by that amount before
/// extracting the next string).
pub fn defragment_text(data: &[u8]) -> Result<(TextField<'_>, usize)> {
    let mut consumed = 0usize;
    let mut cursor = data;
    let mut acc: Option<Vec<u8>> = None;

    loop {
        if cursor.len() < 3 {
            return Err(Error::MalformedLength);
        }
        let tag_raw = u32::from(cursor[0]) << 16 | u32::from(cursor[1]) << 8 | u32::from(cursor[2]);
        cursor = &cursor[3..];
        consumed += 3;

        let (len, len_field_len) = decode_length(cursor)?;
        cursor = &cursor[len_field_len..];
        consumed += len_field_len;

        let len = len as usize;
        let payload = cursor.get(..len).ok_or(Error::MalformedLength)?;

        match Tag::from_u32(tag_raw) {
            Some(Tag::TextLast) => {
                consumed += len;
                return Ok(match acc {
                    None => (TextField::Borrowed(payload), consumed),
                    Some(mut buf) => {
                        buf.extend_from_slice(payload);
                        (TextField::Owned(buf), consumed)
                    }
                });
            }
            Some(Tag::TextMore) => {
                let mut buf = acc.take().unwrap_or_default();
                buf.extend_from_slice(payload);
                acc = Some(buf);
                cursor = &cursor[len..];
                consumed += len;
            }
            _ => return Err(Error::UnexpectedTag { tag: tag_raw }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tlv(tag: u32, payload: &[u8]) -> Vec<u8> {
        let mut v = vec![(tag >> 16) as u8, (tag >> 8) as u8, tag as u8];
        v.push(payload.len() as u8);
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn single_text_last_is_borrowed() {
        let input = tlv(0x9F8803, b"A");
        let (field, consumed) = defragment_text(&input).unwrap();
        assert_eq!(field.as_bytes(), b"A");
        assert!(!field.is_owned());
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn empty_text_last_is_valid_and_borrowed() {
        let input = tlv(0x9F8803, b"");
        let (field, consumed) = defragment_text(&input).unwrap();
        assert!(field.is_empty());
        assert!(!field.is_owned());
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn text_more_chain_concatenates_and_is_owned() {
        let mut input = tlv(0x9F8804, b"Hel");
        input.extend(tlv(0x9F8804, b"lo, "));
        input.extend(tlv(0x9F8803, b"world"));
        let (field, consumed) = defragment_text(&input).unwrap();
        assert_eq!(field.as_bytes(), b"Hello, world");
        assert!(field.is_owned());
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn trailing_bytes_after_the_string_are_not_consumed() {
        let mut input = tlv(0x9F8803, b"A");
        input.extend_from_slice(b"trailing-junk-for-the-next-record");
        let (field, consumed) = defragment_text(&input).unwrap();
        assert_eq!(field.as_bytes(), b"A");
        assert_eq!(consumed, 5); // tag(3) + length(1) + 'A'(1)
    }

    #[test]
    fn unknown_nested_tag_is_unexpected_tag() {
        let input = tlv(0x9F8800, b"A"); // close_mmi is not a valid nested tag here
        let err = defragment_text(&input).unwrap_err();
        assert!(matches!(err, Error::UnexpectedTag { tag: 0x9F8800 }));
    }

    #[test]
    fn declared_length_past_available_bytes_is_malformed_length() {
        let mut input = vec![0x9F, 0x88, 0x03, 0x05]; // length 5
        input.extend_from_slice(b"ab"); // only 2 bytes follow
        let err = defragment_text(&input).unwrap_err();
        assert!(matches!(err, Error::MalformedLength));
    }

    #[test]
    fn truncated_before_tag_is_malformed_length() {
        let input = [0x9F, 0x88];
        let err = defragment_text(&input).unwrap_err();
        assert!(matches!(err, Error::MalformedLength));
    }
}
