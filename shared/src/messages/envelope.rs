use boostlink_serde::{ser_varint, ByteReader, ByteWriter, DecodeError, Serde};

use crate::messages::message_kind::MessageKind;

/// Wraps a payload in the wire envelope: fixed-width kind tag, then a
/// length-prefixed payload body.
///
/// The length prefix is what buys forward compatibility — a decoder reads the
/// fields it knows and the dispatcher skips whatever trailing payload bytes a
/// newer peer appended.
pub fn encode_envelope<P: Serde>(kind: MessageKind, payload: &P) -> Vec<u8> {
    let mut body = ByteWriter::new();
    payload.ser(&mut body);
    let body = body.to_bytes();

    let mut writer = ByteWriter::with_capacity(body.len() + 4);
    kind.tag().ser(&mut writer);
    ser_varint(body.len() as u64, &mut writer);
    writer.write_bytes(&body);
    writer.to_bytes()
}

/// Splits an envelope into its raw kind tag and payload reader. The tag is
/// returned raw (not as [`MessageKind`]) so the dispatcher can report an
/// unknown tag instead of failing the decode.
pub fn open_envelope<'b>(reader: &mut ByteReader<'b>) -> Result<(u16, ByteReader<'b>), DecodeError> {
    let tag = u16::de(reader)?;
    let length = u64::de(reader)? as usize;
    let payload = reader.read_prefixed(length)?;
    Ok((tag, payload))
}
