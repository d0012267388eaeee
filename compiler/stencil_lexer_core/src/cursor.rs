//! Cursor over a sentinel-terminated template buffer.
//!
//! The cursor advances byte-by-byte. EOF is the sentinel (`0x00`) at a
//! position at or past the source length; a NUL byte inside the text is
//! ordinary content.

/// Byte cursor over a [`SourceBuffer`](crate::SourceBuffer).
///
/// The cursor is [`Copy`], so the parser snapshots it for backtracking
/// (e.g. `#` turns out not to start a directive).
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Cursor {
            source,
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` once the cursor sits on the sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the template text.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Source text between two offsets.
    ///
    /// Offsets come from token boundaries, which always sit on ASCII
    /// delimiters and therefore on character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        &self.source[start..end]
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Unconsumed source text.
    pub fn rest(&self) -> &'a str {
        self.slice(self.pos, self.source_len)
    }

    /// Returns `true` if the unconsumed text starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        let start = self.pos as usize;
        let end = start + prefix.len();
        end <= self.source_len as usize && &self.buf[start..end] == prefix
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false` so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.pos < self.source_len && pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Skip spaces, tabs and line breaks (whitespace inside directive arguments).
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    }

    /// Advance past plain template text to the next byte that can start
    /// markup: `$`, `#` or `\`. Returns that byte, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < source_len which fits in u32"
    )]
    pub fn skip_to_text_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr3(b'$', b'#', b'\\', remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance until `byte` is found or EOF. Returns the number of bytes consumed.
    pub fn eat_until(&mut self, byte: u8) -> u32 {
        let start = self.pos;
        while self.pos < self.source_len && self.buf[self.pos as usize] != byte {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Advance to the end of the line (the `\n` is consumed) or EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < source_len which fits in u32"
    )]
    pub fn eat_line(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr(b'\n', remaining) {
            Some(off) => self.pos += off as u32 + 1,
            None => self.pos = self.source_len,
        }
    }

    /// Advance just past the next occurrence of `needle`.
    ///
    /// Returns `false` (cursor moved to EOF) when `needle` does not occur.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < source_len which fits in u32"
    )]
    pub fn eat_past(&mut self, needle: &[u8]) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memmem::find(remaining, needle) {
            self.pos += (off + needle.len()) as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }
}
