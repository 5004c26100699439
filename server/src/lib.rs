//! # Boostlink Server
//! The authoritative side of the synchronization layer: canonical entity
//! state, player sessions, per-player delivery queues and the command
//! dispatcher.

mod command;
mod core;
mod inbound;
mod server;
mod session;
mod world;

pub use command::{
    dispatcher::{
        ArgKind, ArgSpec, ArgValue, CommandDispatcher, CommandExec, CommandInvocation, CommandSpec,
    },
    duration::{parse_duration, pretty},
    error::{CommandError, CommandSetupError},
};
pub use core::ServerCore;
pub use inbound::InboundBuffer;
pub use server::SyncServer;
pub use session::{ConnectionStatus, PlayerSession, SessionMap};
pub use world::HostWorld;
