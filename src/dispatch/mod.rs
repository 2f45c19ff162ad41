//! Line dispatch: tokenize, resolve the first token, invoke one handler.

mod context;
mod tokens;

pub use context::Context;
pub use tokens::Tokens;

use crate::command::{Command, CommandRegistry, DefaultHandler};
use crate::stream::Stream;

/// Result of dispatching one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A registered command ran.
    Matched,
    /// Nothing matched and the default handler ran.
    Fallback,
    /// Nothing matched and no default handler is set.
    Ignored,
}

/// Registry plus fallback, bound to a fixed delimiter set.
pub struct Dispatcher {
    registry: CommandRegistry,
    default_handler: Option<DefaultHandler>,
    delimiters: Box<[u8]>,
}

impl Dispatcher {
    pub fn new(delimiters: &[u8]) -> Self {
        Self {
            registry: CommandRegistry::new(),
            default_handler: None,
            delimiters: delimiters.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn set_default_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&mut Context<'_>, Option<&[u8]>) + 'static,
    {
        let handler: DefaultHandler = Box::new(handler);
        self.default_handler = Some(handler);
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn delimiters(&self) -> &[u8] {
        &self.delimiters
    }

    /// Dispatch a complete line, terminator already stripped.
    ///
    /// Invokes at most one handler. A line without any token goes to the
    /// default handler with `None`.
    pub fn dispatch(&mut self, line: &[u8], stream: Option<&mut (dyn Stream + 'static)>) -> Outcome {
        let Self {
            registry,
            default_handler,
            delimiters,
        } = self;

        tracing::debug!(line = %String::from_utf8_lossy(line), "Received line");

        let mut tokens = Tokens::new(line, delimiters);
        let first = tokens.next();
        let mut ctx = Context::new(tokens, stream);

        if let Some(token) = first {
            if let Some((index, command)) = registry.find_command(token) {
                tracing::debug!(index, name = %command.name(), "Matched command");
                command.invoke(&mut ctx);
                return Outcome::Matched;
            }
        }

        match default_handler {
            Some(handler) => {
                handler(&mut ctx, first);
                Outcome::Fallback
            }
            None => Outcome::Ignored,
        }
    }

    /// Fire the hotkey bound to `byte`, if any. Returns whether one ran.
    pub fn dispatch_hotkey(&mut self, byte: u8, stream: Option<&mut (dyn Stream + 'static)>) -> bool {
        let Some((index, command)) = self.registry.find_hotkey(byte) else {
            return false;
        };
        tracing::debug!(index, name = %command.name(), "Matched hotkey");
        let mut ctx = Context::new(Tokens::empty(), stream);
        command.invoke(&mut ctx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording(log: &Log, name: &str) -> Command {
        let log = Rc::clone(log);
        let tag = name.to_string();
        Command::new(name, move |ctx| {
            let mut entry = tag.clone();
            while let Some(arg) = ctx.next_str() {
                entry.push(':');
                entry.push_str(&arg);
            }
            log.borrow_mut().push(entry);
        })
        .unwrap()
    }

    #[test]
    fn matched_handler_pulls_remaining_tokens() {
        let log = Log::default();
        let mut dispatcher = Dispatcher::new(b" ");
        dispatcher.register(recording(&log, "LED"));

        assert_eq!(dispatcher.dispatch(b"LED ON", None), Outcome::Matched);
        assert_eq!(*log.borrow(), ["LED:ON"]);
    }

    #[test]
    fn unmatched_token_goes_to_default() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new(b" ");
        let sink = Rc::clone(&seen);
        dispatcher.set_default_handler(move |_, token| {
            sink.borrow_mut().push(token.map(<[u8]>::to_vec));
        });

        assert_eq!(dispatcher.dispatch(b"FOO bar", None), Outcome::Fallback);
        assert_eq!(dispatcher.dispatch(b"   ", None), Outcome::Fallback);
        assert_eq!(*seen.borrow(), [Some(b"FOO".to_vec()), None]);
    }

    #[test]
    fn unmatched_without_default_is_ignored() {
        let mut dispatcher = Dispatcher::new(b" ");
        assert_eq!(dispatcher.dispatch(b"FOO", None), Outcome::Ignored);
        assert_eq!(dispatcher.dispatch(b"", None), Outcome::Ignored);
    }

    #[test]
    fn hotkey_context_has_no_tokens() {
        let hits = Rc::new(RefCell::new(0));
        let mut dispatcher = Dispatcher::new(b" ");
        let counter = Rc::clone(&hits);
        dispatcher.register(
            Command::hotkey("!", move |ctx| {
                assert!(ctx.next_token().is_none());
                *counter.borrow_mut() += 1;
            })
            .unwrap(),
        );

        assert!(dispatcher.dispatch_hotkey(b'!', None));
        assert!(!dispatcher.dispatch_hotkey(b'?', None));
        assert_eq!(*hits.borrow(), 1);
    }
}
