/// Wire-format properties: everything the codec writes must read back as the
/// same value, and truncated input must fail cleanly instead of panicking.
use proptest::prelude::*;

use boostlink_shared::{
    de_varint, de_zigzag, open_envelope, ser_varint, ser_zigzag, ByteReader, ByteWriter, Delta,
    EntityId, MessageKind, Serde, Value,
};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        prop::num::f64::NORMAL.prop_map(Value::Float),
        "[a-zA-Z0-9 ]{0,24}".prop_map(Value::Text),
    ]
}

fn delta_strategy() -> impl Strategy<Value = Delta> {
    (
        any::<u64>(),
        0u64..u64::MAX,
        prop::collection::vec(("[a-z_]{1,12}", value_strategy()), 0..6),
    )
        .prop_map(|(entity, base, changes)| Delta {
            entity: EntityId(entity),
            base,
            target: base + 1,
            changes,
        })
}

fn roundtrip<T: Serde + PartialEq + std::fmt::Debug>(value: &T) {
    let mut writer = ByteWriter::new();
    value.ser(&mut writer);
    let bytes = writer.to_bytes();
    let mut reader = ByteReader::new(&bytes);
    let back = T::de(&mut reader).expect("well-formed bytes must decode");
    assert_eq!(&back, value);
    assert_eq!(reader.remaining(), 0, "decode must consume every byte");
}

proptest! {
    #[test]
    fn varint_roundtrips(value in any::<u64>()) {
        let mut writer = ByteWriter::new();
        ser_varint(value, &mut writer);
        let bytes = writer.to_bytes();
        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(de_varint(&mut reader).unwrap(), value);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn zigzag_roundtrips(value in any::<i64>()) {
        let mut writer = ByteWriter::new();
        ser_zigzag(value, &mut writer);
        let bytes = writer.to_bytes();
        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(de_zigzag(&mut reader).unwrap(), value);
    }

    #[test]
    fn values_roundtrip(value in value_strategy()) {
        roundtrip(&value);
    }

    #[test]
    fn deltas_roundtrip(delta in delta_strategy()) {
        roundtrip(&delta);
    }

    #[test]
    fn truncation_never_panics(delta in delta_strategy(), cut in 0usize..64) {
        let mut writer = ByteWriter::new();
        delta.ser(&mut writer);
        let mut bytes = writer.to_bytes();
        if cut < bytes.len() {
            bytes.truncate(cut);
            let mut reader = ByteReader::new(&bytes);
            // either a shorter valid prefix decodes or we get a clean error;
            // what matters is that no input tears the reader down
            let _ = Delta::de(&mut reader);
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic_the_envelope(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut reader = ByteReader::new(&bytes);
        let _ = open_envelope(&mut reader);
    }

    #[test]
    fn envelopes_survive_trailing_extensions(delta in delta_strategy(), tail in prop::collection::vec(any::<u8>(), 0..16)) {
        // a future sender may append fields to the payload; the length prefix
        // lets today's reader skip what it does not understand
        let mut body = ByteWriter::new();
        delta.ser(&mut body);
        let mut payload = body.to_bytes();
        payload.extend_from_slice(&tail);

        let mut writer = ByteWriter::new();
        MessageKind::EntityDelta.ser(&mut writer);
        ser_varint(payload.len() as u64, &mut writer);
        writer.write_bytes(&payload);
        let raw = writer.to_bytes();

        let mut reader = ByteReader::new(&raw);
        let (tag, mut inner) = open_envelope(&mut reader).unwrap();
        prop_assert_eq!(tag, MessageKind::EntityDelta.tag());
        let back = Delta::de(&mut inner).unwrap();
        prop_assert_eq!(back, delta);
    }
}
