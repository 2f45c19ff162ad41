use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::Stream;

#[derive(Default)]
struct Inner {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

/// In-memory loopback stream.
///
/// Clones share the same queues, so one handle can be attached to a reader
/// while another feeds input and inspects replies.
#[derive(Clone, Default)]
pub struct MemoryStream {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the reader.
    pub fn push_input(&self, bytes: &[u8]) {
        self.inner.lock().input.extend(bytes.iter().copied());
    }

    /// Bytes queued but not yet read.
    pub fn pending_input(&self) -> usize {
        self.inner.lock().input.len()
    }

    /// Drain everything written so far.
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.inner.lock().output)
    }

    /// Drain everything written so far as lossy UTF-8.
    pub fn take_output_string(&self) -> String {
        String::from_utf8_lossy(&self.take_output()).into_owned()
    }
}

impl Stream for MemoryStream {
    fn available(&self) -> usize {
        self.inner.lock().input.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.inner.lock().input.pop_front()
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
