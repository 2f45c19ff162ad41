//! Duplex byte streams the reader drains.
//!
//! A stream reports how many bytes are ready and hands them out one at a
//! time without blocking. Writes go back to the peer, which is how command
//! handlers reply.

mod memory;
mod stdio;

use std::io;

pub use memory::MemoryStream;
pub use stdio::StdioStream;

/// Non-blocking duplex byte source.
pub trait Stream: io::Write {
    /// Number of bytes that can be read right now.
    fn available(&self) -> usize;

    /// Read one byte. Returns `None` when nothing is ready; never blocks.
    fn read_byte(&mut self) -> Option<u8>;
}
