use thiserror::Error;

use boostlink_shared::{MutateError, PermissionLevel};

use crate::command::dispatcher::ArgKind;

/// Errors raised while registering commands during mod setup. Fatal: a
/// duplicate name means two pieces of code claimed the same command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandSetupError {
    /// The command name is already taken
    #[error("Command '{name}' is already registered")]
    DuplicateCommand { name: String },
}

/// Structured dispatch failures, surfaced to the invoker as feedback text.
///
/// Permission is checked before any argument parsing, so an unauthorized
/// caller only ever sees `PermissionDenied` — argument validation details are
/// not leaked to them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No command registered under this name
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    /// The invoker's permission level is below what the command requires
    #[error("'{name}' requires {required}")]
    PermissionDenied {
        name: String,
        required: PermissionLevel,
    },

    /// A required argument was not supplied
    #[error("Missing argument '{name}'")]
    MissingArgument { name: String },

    /// More arguments were supplied than the command declares
    #[error("Unexpected trailing argument '{value}'")]
    UnexpectedArgument { value: String },

    /// An argument failed to parse as its declared kind
    #[error("Argument '{name}' expects {expected}, got '{value}'")]
    InvalidArgument {
        name: String,
        expected: ArgKind,
        value: String,
    },

    /// The command executed but the mutation was rejected
    #[error("{0}")]
    Rejected(#[from] MutateError),
}
