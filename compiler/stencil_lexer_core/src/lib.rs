//! Byte-level scanning primitives for template source text.
//!
//! [`SourceBuffer`] copies the template into a sentinel-terminated buffer and
//! hands out [`Cursor`]s. The cursor never needs a bounds check for lookahead:
//! the bytes after the source are all `0x00`.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
