use crate::command::Command;
use crate::config::ScannerConfig;
use crate::dispatch::{Context, Dispatcher, Outcome};
use crate::error::{CommandError, InvalidLine};
use crate::stream::Stream;

use super::buffer::LineBuffer;

/// What happened to a single fed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fed {
    /// NUL byte, dropped without touching any state.
    Skipped,
    /// Stored; the line is still open.
    Buffered,
    /// First byte of a line fired a hotkey; the line was consumed.
    Hotkey,
    /// The terminator completed a line, which was dispatched.
    Line(Outcome),
}

/// Incremental command reader.
///
/// Drains an attached [`Stream`] byte by byte, recognizes terminated lines
/// inside a fixed buffer, and dispatches them. A hotkey registered for the
/// first byte of a line fires immediately instead.
pub struct CommandReader {
    stream: Option<Box<dyn Stream>>,
    buffer: LineBuffer,
    dispatcher: Dispatcher,
}

impl CommandReader {
    /// Reader with no stream attached.
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            stream: None,
            buffer: LineBuffer::new(config.buffer_capacity, config.terminator.as_bytes()),
            dispatcher: Dispatcher::new(config.delimiters.as_bytes()),
        }
    }

    pub fn with_stream<S>(config: &ScannerConfig, stream: S) -> Self
    where
        S: Stream + 'static,
    {
        let mut reader = Self::new(config);
        reader.attach(stream);
        reader
    }

    pub fn register(&mut self, command: Command) {
        self.dispatcher.register(command);
    }

    /// Catch-all for lines whose first token matches no command.
    pub fn set_default_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&mut Context<'_>, Option<&[u8]>) + 'static,
    {
        self.dispatcher.set_default_handler(handler);
    }

    pub fn attach<S>(&mut self, stream: S)
    where
        S: Stream + 'static,
    {
        self.stream = Some(Box::new(stream));
    }

    /// Detach and return the current stream. Later reads report
    /// [`CommandError::NoSource`].
    pub fn detach(&mut self) -> Option<Box<dyn Stream>> {
        self.stream.take()
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn Stream + 'static)> {
        self.stream.as_deref_mut()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Discard everything buffered and any partial terminator match.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Drain every byte the stream has ready right now.
    ///
    /// Returns [`CommandError::NoSource`] without reading when detached.
    /// An overflow discards the open line and returns immediately; bytes
    /// still queued in the stream are left for the next call.
    pub fn read_source(&mut self) -> Result<(), CommandError> {
        loop {
            let stream = self.stream.as_mut().ok_or(CommandError::NoSource)?;
            if stream.available() == 0 {
                return Ok(());
            }
            let Some(byte) = stream.read_byte() else {
                return Ok(());
            };
            self.feed(byte)?;
        }
    }

    /// Advance the scanner by one byte.
    pub fn feed(&mut self, byte: u8) -> Result<Fed, CommandError> {
        tracing::trace!(
            position = self.buffer.position(),
            term_position = self.buffer.term_position(),
            byte = byte,
            "Read"
        );

        if byte == 0 {
            return Ok(Fed::Skipped);
        }

        if self.buffer.push(byte).is_err() {
            let capacity = self.buffer.capacity();
            tracing::warn!(
                capacity,
                usable = self.buffer.usable(),
                "Buffer full, discarding line"
            );
            self.buffer.clear();
            return Err(CommandError::BufferOverflow { capacity });
        }

        if self.buffer.position() == 1
            && self
                .dispatcher
                .dispatch_hotkey(byte, self.stream.as_deref_mut())
        {
            self.buffer.clear();
            return Ok(Fed::Hotkey);
        }

        if !self.buffer.advance_terminator(byte) {
            return Ok(Fed::Buffered);
        }

        let outcome = self
            .dispatcher
            .dispatch(self.buffer.line(), self.stream.as_deref_mut());
        self.buffer.clear();
        Ok(Fed::Line(outcome))
    }

    /// Dispatch `line` as if it had arrived terminated on the stream.
    ///
    /// Anything typed so far is discarded. Hotkeys are never consulted.
    /// A NUL byte ends the line early. The line must be non-empty and
    /// shorter than the usable buffer.
    pub fn process_line(&mut self, line: impl AsRef<[u8]>) -> Result<Outcome, CommandError> {
        let bytes = line.as_ref();
        let bytes = match bytes.iter().position(|&b| b == 0) {
            Some(nul) => &bytes[..nul],
            None => bytes,
        };

        let max = self.buffer.usable().saturating_sub(1);
        if let Err(reason) = validate_line(bytes, max) {
            tracing::warn!(reason = %reason, "Rejected command line");
            return Err(reason.into());
        }

        self.buffer.load(bytes);
        let outcome = self
            .dispatcher
            .dispatch(self.buffer.line(), self.stream.as_deref_mut());
        self.buffer.clear();
        Ok(outcome)
    }
}

fn validate_line(bytes: &[u8], max: usize) -> Result<(), InvalidLine> {
    if bytes.is_empty() {
        return Err(InvalidLine::Empty);
    }
    if bytes.len() > max {
        return Err(InvalidLine::TooLong {
            len: bytes.len(),
            max,
        });
    }
    Ok(())
}
