use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

/// Server → client: switch the client-side HUD overlay on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudToggle {
    pub enabled: bool,
}

impl Serde for HudToggle {
    fn ser(&self, writer: &mut ByteWriter) {
        self.enabled.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(Self {
            enabled: bool::de(reader)?,
        })
    }
}
