//! Byte-at-a-time line scanning.
//!
//! ```text
//! Stream ─byte─→ LineBuffer ─┬─ first byte ─→ hotkey
//!                            └─ terminator ─→ Dispatcher
//! ```

mod buffer;
mod reader;

pub use buffer::{Full, LineBuffer};
pub use reader::{CommandReader, Fed};
