use std::collections::HashMap;

use log::{debug, warn};

use boostlink_serde::{ByteReader, DecodeError};

use crate::{
    messages::{envelope::open_envelope, error::RegistryError, message_kind::MessageKind},
    types::{HostType, PlayerId},
};

/// Which way a message kind is allowed to travel. Enforced at dispatch by the
/// receiving side, not by the message itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ClientToServer,
    ServerToClient,
    Bidirectional,
}

impl Direction {
    pub fn received_by(&self, host: HostType) -> bool {
        match self {
            Direction::ClientToServer => host == HostType::Server,
            Direction::ServerToClient => host == HostType::Client,
            Direction::Bidirectional => true,
        }
    }
}

/// Who a message came from. On the server this names the sending player; on
/// the client the sender is always the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderContext {
    pub player: Option<PlayerId>,
}

impl SenderContext {
    pub fn from_player(player: PlayerId) -> Self {
        Self {
            player: Some(player),
        }
    }

    pub fn from_server() -> Self {
        Self { player: None }
    }
}

/// A handler decodes its payload from the reader and applies it to the
/// host-side state `C`. Handlers run synchronously on the tick thread and
/// must not block on I/O.
pub type MessageHandler<C> =
    Box<dyn FnMut(&mut C, &mut ByteReader, &SenderContext) -> Result<(), DecodeError>>;

struct Registration<C> {
    kind: MessageKind,
    direction: Direction,
    handler: MessageHandler<C>,
}

/// The result of dispatching one inbound envelope.
///
/// Only `Handled` means a handler ran. Every other outcome is non-fatal: the
/// message is dropped, logged, and the connection stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    /// The envelope itself was truncated or malformed
    MalformedEnvelope,
    /// Tag not registered on this side — protocol-version skew, dropped
    UnknownKind { tag: u16 },
    /// Registered, but not for traffic arriving at this host
    WrongDirection { kind: MessageKind },
    /// The payload failed to decode
    DecodeFailed { kind: MessageKind },
}

/// Process-wide table mapping message-type tags to handlers, resolved once at
/// registration. Built during mod initialization, locked at startup.
pub struct ChannelRegistry<C> {
    host: HostType,
    entries: HashMap<u16, Registration<C>>,
    locked: bool,
}

impl<C> ChannelRegistry<C> {
    pub fn new(host: HostType) -> Self {
        Self {
            host,
            entries: HashMap::new(),
            locked: false,
        }
    }

    pub fn host(&self) -> HostType {
        self.host
    }

    /// Binds a handler to a message kind. Duplicate registration is a
    /// programming error and fails so that initialization can abort.
    pub fn register(
        &mut self,
        kind: MessageKind,
        direction: Direction,
        handler: MessageHandler<C>,
    ) -> Result<(), RegistryError> {
        if self.locked {
            return Err(RegistryError::RegistryLocked { kind });
        }
        if self.entries.contains_key(&kind.tag()) {
            return Err(RegistryError::DuplicateKind { kind });
        }
        self.entries.insert(
            kind.tag(),
            Registration {
                kind,
                direction,
                handler,
            },
        );
        Ok(())
    }

    /// Freezes the table. Called once startup completes; late registrations
    /// indicate a bug and are rejected.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Decodes the envelope and routes the payload to its handler, applying
    /// it to `state`. Never panics on remote input.
    pub fn dispatch(&mut self, raw: &[u8], ctx: &SenderContext, state: &mut C) -> DispatchOutcome {
        let mut reader = ByteReader::new(raw);
        let (tag, mut payload) = match open_envelope(&mut reader) {
            Ok(parts) => parts,
            Err(error) => {
                warn!("Dropping malformed envelope from {ctx:?}: {error}");
                return DispatchOutcome::MalformedEnvelope;
            }
        };

        let Some(registration) = self.entries.get_mut(&tag) else {
            debug!("Dropping message with unknown tag {tag} from {ctx:?} (protocol skew?)");
            return DispatchOutcome::UnknownKind { tag };
        };

        if !registration.direction.received_by(self.host) {
            warn!(
                "Dropping {:?} from {ctx:?}: not valid traffic towards {:?}",
                registration.kind, self.host
            );
            return DispatchOutcome::WrongDirection {
                kind: registration.kind,
            };
        }

        match (registration.handler)(state, &mut payload, ctx) {
            Ok(()) => DispatchOutcome::Handled,
            Err(error) => {
                warn!(
                    "Dropping {:?} from {ctx:?}: payload decode failed: {error}",
                    registration.kind
                );
                DispatchOutcome::DecodeFailed {
                    kind: registration.kind,
                }
            }
        }
    }
}
