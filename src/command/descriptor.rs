//! Command descriptors: a name, a handler and how the name is matched.

use std::fmt;

use crate::dispatch::Context;
use crate::error::CommandError;

/// Handler for regular and hotkey commands.
pub type Handler = Box<dyn FnMut(&mut Context<'_>)>;

/// Fallback handler. Receives the unmatched first token, or `None` when the
/// line held no token at all.
pub type DefaultHandler = Box<dyn FnMut(&mut Context<'_>, Option<&[u8]>)>;

/// How a command is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Matched against the first token of a terminated line, full-length.
    Regular,
    /// Fires on the first byte of a line, no terminator needed. Only the
    /// first byte of the name is significant.
    Hotkey,
}

/// A single command definition.
pub struct Command {
    name: String,
    kind: CommandKind,
    handler: Handler,
}

impl Command {
    /// Regular command matched by its full name.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Result<Self, CommandError>
    where
        F: FnMut(&mut Context<'_>) + 'static,
    {
        Self::with_kind(name.into(), CommandKind::Regular, Box::new(handler))
    }

    /// Hotkey command fired by the first byte of `name`.
    pub fn hotkey<F>(name: impl Into<String>, handler: F) -> Result<Self, CommandError>
    where
        F: FnMut(&mut Context<'_>) + 'static,
    {
        Self::with_kind(name.into(), CommandKind::Hotkey, Box::new(handler))
    }

    fn with_kind(name: String, kind: CommandKind, handler: Handler) -> Result<Self, CommandError> {
        if name.is_empty() {
            return Err(CommandError::EmptyName);
        }
        Ok(Self {
            name,
            kind,
            handler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn is_hotkey(&self) -> bool {
        self.kind == CommandKind::Hotkey
    }

    /// Check if this command is named exactly `token`.
    pub fn matches(&self, token: &[u8]) -> bool {
        self.name.as_bytes() == token
    }

    /// Check if this command's key is `byte`.
    pub fn matches_key(&self, byte: u8) -> bool {
        self.name.as_bytes().first() == Some(&byte)
    }

    pub(crate) fn invoke(&mut self, ctx: &mut Context<'_>) {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
