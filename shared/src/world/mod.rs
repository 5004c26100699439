pub mod delta;
pub mod entity_state;
pub mod error;
pub mod schema;
pub mod value;
