pub mod bus;
pub mod error;
