use crate::{
    error::DecodeError,
    integer::{de_varint, de_zigzag, ser_varint, ser_zigzag},
    reader::ByteReader,
    writer::ByteWriter,
};

/// A type that can be serialized to / deserialized from wire bytes.
///
/// Implementations must be deterministic: the same logical value always
/// encodes to the same bytes. Ordered containers and canonical integer
/// encodings keep this true for composite types.
pub trait Serde: Sized {
    fn ser(&self, writer: &mut ByteWriter);
    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError>;
}

impl Serde for () {
    fn ser(&self, _writer: &mut ByteWriter) {}

    fn de(_reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(())
    }
}

impl Serde for bool {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(DecodeError::InvalidTag { tag: tag.into() }),
        }
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        reader.read_byte()
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let bytes = reader.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

impl Serde for u64 {
    fn ser(&self, writer: &mut ByteWriter) {
        ser_varint(*self, writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        de_varint(reader)
    }
}

impl Serde for i64 {
    fn ser(&self, writer: &mut ByteWriter) {
        ser_zigzag(*self, writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        de_zigzag(reader)
    }
}

impl Serde for f64 {
    // IEEE-754 bit pattern, fixed width; NaN payloads survive untouched so
    // encoding stays deterministic.
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.to_bits().to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let bytes = reader.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_bits(u64::from_be_bytes(raw)))
    }
}

impl Serde for String {
    fn ser(&self, writer: &mut ByteWriter) {
        ser_varint(self.len() as u64, writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let length = de_varint(reader)? as usize;
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }
}

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut ByteWriter) {
        match self {
            None => writer.write_byte(0),
            Some(value) => {
                writer.write_byte(1);
                value.ser(writer);
            }
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        match reader.read_byte()? {
            0 => Ok(None),
            1 => Ok(Some(T::de(reader)?)),
            tag => Err(DecodeError::InvalidTag { tag: tag.into() }),
        }
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut ByteWriter) {
        ser_varint(self.len() as u64, writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let length = de_varint(reader)? as usize;
        // sanity bound: every element takes at least one byte on the wire
        if length > reader.remaining() {
            return Err(DecodeError::LengthOverflow {
                length,
                remaining: reader.remaining(),
            });
        }
        let mut items = Vec::with_capacity(length);
        for _ in 0..length {
            items.push(T::de(reader)?);
        }
        Ok(items)
    }
}

impl<A: Serde, B: Serde> Serde for (A, B) {
    fn ser(&self, writer: &mut ByteWriter) {
        self.0.ser(writer);
        self.1.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok((A::de(reader)?, B::de(reader)?))
    }
}
