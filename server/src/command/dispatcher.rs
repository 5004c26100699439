use std::{collections::HashMap, fmt, time::Duration};

use boostlink_shared::{MutateError, PermissionLevel, PlayerId};

use crate::{
    command::{
        duration::parse_duration,
        error::{CommandError, CommandSetupError},
    },
    core::ServerCore,
};

/// The argument types a command grammar can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Word,
    Int,
    Float,
    /// `<value><s|m|h|d>`, e.g. `90s` or `2h`
    Duration,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Word => "a word",
            ArgKind::Int => "an integer",
            ArgKind::Float => "a number",
            ArgKind::Duration => "a duration (e.g. 90s, 2h)",
        };
        write!(f, "{name}")
    }
}

/// A parsed argument, handed to the command executor.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Word(String),
    Int(i64),
    Float(f64),
    Duration(Duration),
}

impl ArgValue {
    pub fn as_word(&self) -> Option<&str> {
        match self {
            ArgValue::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            ArgValue::Duration(value) => Some(*value),
            _ => None,
        }
    }
}

/// One declared argument: a name (used in error messages) and its kind.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: String,
    pub kind: ArgKind,
}

impl ArgSpec {
    pub fn new(name: &str, kind: ArgKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// A command as the host hands it over: who ran it, with what level, the
/// command name and the raw argument words. Ephemeral — lives only for the
/// duration of dispatch.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub invoker: PlayerId,
    pub permission: PermissionLevel,
    pub name: String,
    pub args: Vec<String>,
}

/// Executors mutate shared state through the [`ServerCore`] and return the
/// feedback line shown to the invoker.
pub type CommandExec =
    Box<dyn FnMut(&CommandInvocation, &[ArgValue], &mut ServerCore) -> Result<String, MutateError>>;

/// A registered command: name, required permission, argument grammar and the
/// executor that runs once everything validates.
pub struct CommandSpec {
    name: String,
    required: PermissionLevel,
    args: Vec<ArgSpec>,
    exec: CommandExec,
}

impl CommandSpec {
    pub fn new(name: &str, required: PermissionLevel, args: Vec<ArgSpec>, exec: CommandExec) -> Self {
        Self {
            name: name.to_string(),
            required,
            args,
            exec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Routes invocations to registered commands.
///
/// Dispatch order is deliberate: permission first, then arity, then
/// per-argument parsing, then execution. Every failure is a result value —
/// nothing here panics into the host's command callback.
#[derive(Default)]
pub struct CommandDispatcher {
    commands: HashMap<String, CommandSpec>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CommandSpec) -> Result<(), CommandSetupError> {
        if self.commands.contains_key(spec.name()) {
            return Err(CommandSetupError::DuplicateCommand {
                name: spec.name().to_string(),
            });
        }
        self.commands.insert(spec.name().to_string(), spec);
        Ok(())
    }

    pub fn dispatch(
        &mut self,
        invocation: &CommandInvocation,
        core: &mut ServerCore,
    ) -> Result<String, CommandError> {
        let spec = self
            .commands
            .get_mut(&invocation.name)
            .ok_or_else(|| CommandError::UnknownCommand {
                name: invocation.name.clone(),
            })?;

        // permission before argument parsing: unauthorized callers learn
        // nothing about the grammar
        if !invocation.permission.permits(spec.required) {
            return Err(CommandError::PermissionDenied {
                name: spec.name.clone(),
                required: spec.required,
            });
        }

        let mut values = Vec::with_capacity(spec.args.len());
        for (index, arg_spec) in spec.args.iter().enumerate() {
            let raw = invocation.args.get(index).ok_or_else(|| {
                CommandError::MissingArgument {
                    name: arg_spec.name.clone(),
                }
            })?;
            values.push(parse_arg(arg_spec, raw)?);
        }
        if invocation.args.len() > spec.args.len() {
            return Err(CommandError::UnexpectedArgument {
                value: invocation.args[spec.args.len()].clone(),
            });
        }

        (spec.exec)(invocation, &values, core).map_err(CommandError::from)
    }
}

fn parse_arg(spec: &ArgSpec, raw: &str) -> Result<ArgValue, CommandError> {
    let invalid = || CommandError::InvalidArgument {
        name: spec.name.clone(),
        expected: spec.kind,
        value: raw.to_string(),
    };
    match spec.kind {
        ArgKind::Word => Ok(ArgValue::Word(raw.to_string())),
        ArgKind::Int => raw.parse().map(ArgValue::Int).map_err(|_| invalid()),
        ArgKind::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(ArgValue::Float)
            .ok_or_else(invalid),
        ArgKind::Duration => parse_duration(raw).map(ArgValue::Duration).ok_or_else(invalid),
    }
}
