//! Command registry: two insertion-ordered lists, first match wins.

use super::descriptor::{Command, CommandKind};

/// Regular and hotkey commands, each kept in registration order.
///
/// Lists are append-only. Duplicate names are allowed; the earlier entry
/// always shadows the later one.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    hotkeys: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `command` to the list selected by its kind.
    pub fn register(&mut self, command: Command) {
        let list = match command.kind() {
            CommandKind::Regular => &mut self.commands,
            CommandKind::Hotkey => &mut self.hotkeys,
        };
        tracing::debug!(
            name = %command.name(),
            kind = ?command.kind(),
            index = list.len(),
            "Registered command"
        );
        list.push(command);
    }

    /// First regular command whose name equals `token` exactly.
    pub fn find_command(&mut self, token: &[u8]) -> Option<(usize, &mut Command)> {
        self.commands
            .iter_mut()
            .enumerate()
            .find(|(_, cmd)| cmd.matches(token))
    }

    /// First hotkey whose name starts with `byte`.
    pub fn find_hotkey(&mut self, byte: u8) -> Option<(usize, &mut Command)> {
        self.hotkeys
            .iter_mut()
            .enumerate()
            .find(|(_, cmd)| cmd.matches_key(byte))
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn hotkey_count(&self) -> usize {
        self.hotkeys.len()
    }

    /// Names of all commands, regular first, each list in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .chain(self.hotkeys.iter())
            .map(Command::name)
    }
}
