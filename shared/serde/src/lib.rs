//! # Boostlink Serde
//! Deterministic binary wire codec primitives shared between the
//! boostlink-server & boostlink-client crates.

mod error;
mod integer;
mod reader;
mod serde;
mod writer;

pub use error::DecodeError;
pub use integer::{de_varint, de_zigzag, ser_varint, ser_zigzag};
pub use reader::ByteReader;
pub use serde::Serde;
pub use writer::ByteWriter;
