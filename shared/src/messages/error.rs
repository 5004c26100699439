use thiserror::Error;

use crate::messages::message_kind::MessageKind;

/// Errors raised while wiring up the channel registry.
///
/// These indicate a programming error in mod setup and are the one error
/// class treated as fatal: initialization aborts rather than running with a
/// half-registered protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The message kind already has a handler bound
    #[error("Message kind {kind:?} is already registered")]
    DuplicateKind { kind: MessageKind },

    /// Registration was attempted after the registry was locked at startup
    #[error("Registry is locked; cannot register {kind:?} after startup")]
    RegistryLocked { kind: MessageKind },
}
