pub mod dispatcher;
pub mod duration;
pub mod error;
