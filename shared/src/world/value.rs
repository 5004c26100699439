use std::fmt;

use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

/// The value types the wire protocol can carry for an entity attribute:
/// toggles, counts, multipliers and short labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}

impl Serde for Value {
    fn ser(&self, writer: &mut ByteWriter) {
        match self {
            Value::Bool(v) => {
                writer.write_byte(0);
                v.ser(writer);
            }
            Value::Int(v) => {
                writer.write_byte(1);
                v.ser(writer);
            }
            Value::Float(v) => {
                writer.write_byte(2);
                v.ser(writer);
            }
            Value::Text(v) => {
                writer.write_byte(3);
                v.ser(writer);
            }
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        match reader.read_byte()? {
            0 => Ok(Value::Bool(bool::de(reader)?)),
            1 => Ok(Value::Int(i64::de(reader)?)),
            2 => Ok(Value::Float(f64::de(reader)?)),
            3 => Ok(Value::Text(String::de(reader)?)),
            tag => Err(DecodeError::InvalidTag { tag: tag.into() }),
        }
    }
}

/// The type half of the schema contract: every attribute declares which
/// [`Value`] variant it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
        };
        write!(f, "{name}")
    }
}
