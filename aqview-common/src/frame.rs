//! Fixed-capacity channel frame codec
//!
//! The producer handoff carries one frame: UTF-8 JSON text right-padded with
//! trailing null bytes up to a fixed capacity. There is no length prefix and
//! no checksum; the capacity and padding convention are the whole contract.
//! An oversized payload fails loudly with `Error::PayloadTooLarge` on both
//! the encode and the receive side, never by truncation.

use std::io::Read;

use crate::error::{Error, Result};

/// Frame capacity in bytes, matching the producer contract
pub const FRAME_CAPACITY: usize = 100_000;

/// Encode a payload into a full-capacity null-padded frame.
///
/// Fails with `Error::PayloadTooLarge` when the payload does not fit.
///
/// # Examples
///
/// ```
/// use aqview_common::frame;
///
/// let frame = frame::encode("{}", 8).unwrap();
/// assert_eq!(frame, b"{}\0\0\0\0\0\0");
/// assert!(frame::encode("{\"k\": 1}!", 8).is_err());
/// ```
pub fn encode(payload: &str, capacity: usize) -> Result<Vec<u8>> {
    let bytes = payload.as_bytes();
    if bytes.len() > capacity {
        return Err(Error::PayloadTooLarge {
            len: bytes.len(),
            capacity,
        });
    }
    let mut frame = vec![0u8; capacity];
    frame[..bytes.len()].copy_from_slice(bytes);
    Ok(frame)
}

/// Decode a frame: strip trailing null padding and validate UTF-8.
///
/// Fails with `Error::Decode` when the remaining bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use aqview_common::frame;
///
/// assert_eq!(frame::decode(b"{}\0\0\0\0\0\0").unwrap(), "{}");
/// assert_eq!(frame::decode(b"{}").unwrap(), "{}");
/// ```
pub fn decode(frame: &[u8]) -> Result<&str> {
    let end = frame.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    std::str::from_utf8(&frame[..end])
        .map_err(|e| Error::Decode(format!("frame content is not valid UTF-8: {e}")))
}

/// Read one frame from a byte stream, up to `capacity` bytes.
///
/// Reads until end of stream. A peer that transmits more than `capacity`
/// bytes fails with `Error::PayloadTooLarge`.
/// A peer that closes the stream early is fine: the trailing padding is
/// optional on the wire since end of stream delimits the frame.
pub fn read_frame<R: Read>(reader: R, capacity: usize) -> Result<Vec<u8>> {
    let mut frame = Vec::new();
    reader
        .take(capacity as u64 + 1)
        .read_to_end(&mut frame)
        .map_err(Error::Io)?;
    if frame.len() > capacity {
        return Err(Error::PayloadTooLarge {
            len: frame.len(),
            capacity,
        });
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encode_pads_to_capacity() {
        let frame = encode("abc", 10).unwrap();
        assert_eq!(frame.len(), 10);
        assert_eq!(&frame[..3], b"abc");
        assert!(frame[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_exact_fit_has_no_padding() {
        let frame = encode("abcd", 4).unwrap();
        assert_eq!(frame, b"abcd");
    }

    #[test]
    fn test_encode_oversized_payload_fails_loudly() {
        let err = encode("abcde", 4).unwrap_err();
        assert!(
            matches!(err, Error::PayloadTooLarge { len: 5, capacity: 4 }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_decode_strips_trailing_padding_only() {
        assert_eq!(decode(b"ab\0cd\0\0\0").unwrap(), "ab\0cd");
    }

    #[test]
    fn test_decode_all_padding_is_empty() {
        assert_eq!(decode(b"\0\0\0\0").unwrap(), "");
        assert_eq!(decode(b"").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_read_frame_full_capacity() {
        let frame = encode("payload", 32).unwrap();
        let read = read_frame(Cursor::new(frame.clone()), 32).unwrap();
        assert_eq!(read, frame);
        assert_eq!(decode(&read).unwrap(), "payload");
    }

    #[test]
    fn test_read_frame_short_stream() {
        let read = read_frame(Cursor::new(b"payload".to_vec()), 32).unwrap();
        assert_eq!(decode(&read).unwrap(), "payload");
    }

    #[test]
    fn test_read_frame_over_capacity_fails_loudly() {
        let err = read_frame(Cursor::new(vec![b'x'; 33]), 32).unwrap_err();
        assert!(
            matches!(err, Error::PayloadTooLarge { capacity: 32, .. }),
            "got {err:?}"
        );
    }
}
