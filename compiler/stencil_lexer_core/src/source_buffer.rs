//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` sentinel byte after the template text,
//! so the cursor detects EOF without explicit bounds checking. The total
//! buffer size is rounded up to the next 64-byte boundary with
//! at least one byte of padding after it, so `peek()` on the sentinel is safe.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated copy of a template's text.
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer<'a> {
    /// Original text, used for `&str` slicing.
    source: &'a str,
    /// `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the template text (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> SourceBuffer<'a> {
    /// Copy `source` into a cache-line padded, sentinel-terminated buffer.
    ///
    /// Texts longer than `u32::MAX` bytes saturate `source_len`; the parser
    /// rejects them before scanning.
    pub fn new(source: &'a str) -> Self {
        let source_bytes = source.as_bytes();
        let len = source_bytes.len();

        let padded_len = (len + 2 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..len].copy_from_slice(source_bytes);

        SourceBuffer {
            source,
            buf,
            source_len: u32::try_from(len).unwrap_or(u32::MAX),
        }
    }

    /// The full buffer, including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self.source, &self.buf, self.source_len)
    }

    /// Length of the template text in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the template text is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
