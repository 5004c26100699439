//! # Boostlink Client
//! The replica side of the synchronization layer: a cached copy of the
//! server's entity state, kept in step by idempotent delta application and
//! snapshot reconciliation.

mod client;
mod core;
mod replica;

pub use client::{ClientInbound, SyncClient};
pub use core::ClientCore;
pub use replica::ReplicaWorld;
