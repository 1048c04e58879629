use an2k_wire::Charset;

use crate::error::CodecError;

/// Parse cursor over a fully-buffered input.
///
/// Besides the position, the cursor carries the active [`Charset`] —
/// mutable state that starts at CP1256, is re-pinned once the Type-1
/// header's domain-of-use field has been read, and stays fixed for the
/// rest of the parse. Handlers receive the cursor by mutable reference;
/// there is no global decoder state.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    charset: Charset,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            charset: Charset::Cp1256,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// The unconsumed remainder of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Take exactly `n` bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnexpectedEndOfInput`] if fewer remain.
    pub fn take_exact(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEndOfInput { offset: self.pos });
        }
        let span = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(span)
    }

    /// Take up to `n` bytes, clamped at the end of the buffer. This is
    /// the tolerant path for truncated DATA payloads.
    pub fn take_up_to(&mut self, n: usize) -> &'a [u8] {
        let n = n.min(self.remaining());
        let span = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        span
    }

    /// Take every byte before the next occurrence of `stop`, consuming
    /// the `stop` byte itself. When `stop` never occurs, takes the rest
    /// of the buffer and reports `found = false`.
    pub fn take_until(&mut self, stop: u8) -> (&'a [u8], bool) {
        match self.buf[self.pos..].iter().position(|&b| b == stop) {
            Some(offset) => {
                let span = &self.buf[self.pos..self.pos + offset];
                self.pos += offset + 1;
                (span, true)
            }
            None => {
                let span = &self.buf[self.pos..];
                self.pos = self.buf.len();
                (span, false)
            }
        }
    }

    /// Consume one byte if it equals `expected`.
    pub fn bump_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}
