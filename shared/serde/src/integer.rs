use crate::{error::DecodeError, reader::ByteReader, writer::ByteWriter};

// A u64 fits in at most ten 7-bit groups.
const VARINT_MAX_BYTES: usize = 10;

/// Writes an unsigned integer as little-endian 7-bit groups, the high bit of
/// each byte marking continuation. Small values (versions, lengths, ids)
/// dominate the wire, so this stays compact without a fixed width.
pub fn ser_varint(mut value: u64, writer: &mut ByteWriter) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        writer.write_byte(byte);
        if value == 0 {
            return;
        }
    }
}

/// Reads a var-int written by [`ser_varint`].
pub fn de_varint(reader: &mut ByteReader) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    for _ in 0..VARINT_MAX_BYTES {
        let byte = reader.read_byte()?;
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
    Err(DecodeError::VarIntOverflow {
        max_bytes: VARINT_MAX_BYTES,
    })
}

/// Zig-zag maps signed integers onto unsigned ones so that values near zero
/// in either direction encode small.
pub fn ser_zigzag(value: i64, writer: &mut ByteWriter) {
    let encoded = ((value << 1) ^ (value >> 63)) as u64;
    ser_varint(encoded, writer);
}

/// Reads a zig-zag var-int written by [`ser_zigzag`].
pub fn de_zigzag(reader: &mut ByteReader) -> Result<i64, DecodeError> {
    let encoded = de_varint(reader)?;
    Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
}
