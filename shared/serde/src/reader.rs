use crate::error::DecodeError;

/// A cursor over received wire bytes.
///
/// Every read is bounds-checked and reports [`DecodeError::UnexpectedEnd`]
/// instead of panicking, since the bytes come from the remote host and may be
/// truncated or malformed.
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        if self.cursor >= self.buffer.len() {
            return Err(DecodeError::UnexpectedEnd {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'b [u8], DecodeError> {
        if self.remaining() < count {
            return Err(DecodeError::UnexpectedEnd {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buffer[self.cursor..self.cursor + count];
        self.cursor += count;
        Ok(slice)
    }

    /// Reads a length-prefixed sub-buffer. Bytes of the sub-buffer that the
    /// caller does not consume are simply skipped, which is what lets older
    /// peers ignore trailing fields added by newer protocol versions.
    pub fn read_prefixed(&mut self, length: usize) -> Result<ByteReader<'b>, DecodeError> {
        if self.remaining() < length {
            return Err(DecodeError::LengthOverflow {
                length,
                remaining: self.remaining(),
            });
        }
        let inner = ByteReader::new(&self.buffer[self.cursor..self.cursor + length]);
        self.cursor += length;
        Ok(inner)
    }
}
