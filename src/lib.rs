//! Incremental command line scanner and dispatcher.
//!
//! Bytes arrive from a non-blocking [`Stream`](stream::Stream) in chunks of
//! any size. [`CommandReader`](scanner::CommandReader) accumulates them in a
//! fixed buffer, recognizes terminated lines, and hands each line to the
//! [`Dispatcher`](dispatch::Dispatcher), which runs the matching
//! [`Command`](command::Command) handler.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod stream;

pub use command::{Command, CommandKind, CommandRegistry};
pub use config::{Config, ConfigError, ScannerConfig};
pub use dispatch::{Context, Dispatcher, Outcome};
pub use error::{CommandError, InvalidLine};
pub use scanner::{CommandReader, Fed};
pub use stream::{MemoryStream, StdioStream, Stream};
