//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::cell::RefCell;
use std::rc::Rc;

use serialcmd::{Command, CommandReader, MemoryStream, ScannerConfig};

/// Ordered record of handler invocations.
pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Command name and every remaining token it pulled.
    Command(String, Vec<String>),
    Hotkey(String),
    /// Unmatched first token, if any.
    Default(Option<String>),
}

pub fn scanner_config(capacity: usize) -> ScannerConfig {
    ScannerConfig {
        buffer_capacity: capacity,
        terminator: "\r\n".to_string(),
        delimiters: " ".to_string(),
    }
}

/// Reader wired to a loopback stream; returns the peer handle.
pub fn reader_with_peer(config: &ScannerConfig) -> (CommandReader, MemoryStream) {
    let peer = MemoryStream::new();
    let reader = CommandReader::with_stream(config, peer.clone());
    (reader, peer)
}

/// Command that records its name and all remaining tokens.
pub fn recording_command(log: &CallLog, name: &str) -> Command {
    let log = Rc::clone(log);
    let tag = name.to_string();
    Command::new(name, move |ctx| {
        let mut args = Vec::new();
        while let Some(arg) = ctx.next_str() {
            args.push(arg.into_owned());
        }
        log.borrow_mut().push(Call::Command(tag.clone(), args));
    })
    .expect("valid command name")
}

pub fn recording_hotkey(log: &CallLog, name: &str) -> Command {
    let log = Rc::clone(log);
    let tag = name.to_string();
    Command::hotkey(name, move |_| {
        log.borrow_mut().push(Call::Hotkey(tag.clone()));
    })
    .expect("valid command name")
}

pub fn record_default(reader: &mut CommandReader, log: &CallLog) {
    let log = Rc::clone(log);
    reader.set_default_handler(move |_, token| {
        let token = token.map(|t| String::from_utf8_lossy(t).into_owned());
        log.borrow_mut().push(Call::Default(token));
    });
}

/// Feed bytes one per `read_source` call, as a slow link would.
pub fn trickle(reader: &mut CommandReader, peer: &MemoryStream, bytes: &[u8]) {
    for &byte in bytes {
        peer.push_input(&[byte]);
        reader.read_source().expect("no overflow while trickling");
    }
}
