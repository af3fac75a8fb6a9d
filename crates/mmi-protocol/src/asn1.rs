//! ASN.1 BER short/long-form length encoding, as used throughout EN 50221.
//!
//! Three call sites share this codec: the long-form length prefix on
//! `enq`/`keypad_control`/the fragmentable objects, the nested text-string
//! lengths inside a reassembled menu/list payload, and every outgoing
//! encoder. Keeping it as two free functions with their own tests avoids
//! three slightly-different reimplementations drifting apart.
//!
//! - A single byte with the top bit clear encodes lengths `0..=127`.
//! - A single byte `0x8N` (`N` = 1..=4) followed by `N` big-endian bytes
//!   encodes any length that fits in 32 bits.
//! - Any other leading byte, or a short/overflowing continuation, is
//!   [`mmi_core::Error::MalformedLength`].

use mmi_core::{Error, Result};

/// Decodes an ASN.1 BER length prefix from the start of `data`.
///
/// Returns `(length, bytes_consumed)`. Does not validate that `length`
/// bytes of payload actually follow in `data` — callers check that against
/// their own remaining-length bookkeeping, since the two checks report
/// different things (`ShortData` vs `MalformedLength`).
pub fn decode_length(data: &[u8]) -> Result<(u32, usize)> {
    let first = *data.first().ok_or(Error::MalformedLength)?;

    if first & 0x80 == 0 {
        return Ok((u32::from(first), 1));
    }

    let count = usize::from(first & 0x7F);
    if count == 0 || count > 4 {
        return Err(Error::MalformedLength);
    }
    let bytes = data.get(1..1 + count).ok_or(Error::MalformedLength)?;

    let mut length: u32 = 0;
    for &b in bytes {
        length = (length << 8) | u32::from(b);
    }
    Ok((length, 1 + count))
}

/// Encodes `length` into `out` using the shortest legal ASN.1 BER form.
///
/// Returns the number of bytes written (1 to 5). `out` must have at least
/// 5 bytes of capacity; callers that know their length is short-form can
/// size smaller, but the common call pattern is a fixed-size stack buffer.
pub fn encode_length(length: u32, out: &mut [u8]) -> Result<usize> {
    if length <= 0x7F {
        *out.first_mut().ok_or(Error::MalformedLength)? = length as u8;
        return Ok(1);
    }

    let be = length.to_be_bytes();
    let first_significant = be.iter().position(|&b| b != 0).unwrap_or(3);
    let significant = &be[first_significant..];
    let count = significant.len();

    if out.len() < count + 1 {
        return Err(Error::MalformedLength);
    }
    out[0] = 0x80 | count as u8;
    out[1..1 + count].copy_from_slice(significant);
    Ok(1 + count)
}

/// Appends the shortest-form encoding of `length` to a `Vec<u8>`.
///
/// Convenience wrapper around [`encode_length`] for encoders that are
/// already building into an owned buffer rather than a fixed stack array.
pub fn encode_length_into(length: u32, out: &mut Vec<u8>) {
    let mut buf = [0u8; 5];
    let n = encode_length(length, &mut buf).expect("encode_length never fails into 5 bytes");
    out.extend_from_slice(&buf[..n]);
}
