pub mod envelope;
pub mod error;
pub mod hud_toggle;
pub mod message_kind;
pub mod registry;
pub mod snapshot_request;
