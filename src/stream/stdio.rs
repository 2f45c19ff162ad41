use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use super::Stream;

struct Shared {
    input: Mutex<VecDeque<u8>>,
    closed: AtomicBool,
}

/// Stream over a blocking reader and stdout.
///
/// A background thread pumps the reader into a queue so that polling the
/// stream never blocks. Replies are written to stdout.
#[derive(Clone)]
pub struct StdioStream {
    shared: Arc<Shared>,
}

impl StdioStream {
    /// Pump stdin.
    pub fn stdin() -> Self {
        Self::spawn(io::stdin())
    }

    /// Write-only stream on stdout. Nothing is ever available to read.
    pub fn stdout() -> Self {
        Self {
            shared: Arc::new(Shared {
                input: Mutex::new(VecDeque::new()),
                closed: AtomicBool::new(true),
            }),
        }
    }

    /// Pump an arbitrary reader until EOF or error.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::spawn_until(reader, &[])
    }

    /// Like [`StdioStream::spawn`], but the input also ends at the first
    /// byte found in `interrupts`. That byte and everything after it is
    /// dropped.
    ///
    /// A terminal in raw mode delivers Ctrl-C and Ctrl-D as plain bytes, so
    /// this is how the console notices them.
    pub fn spawn_until<R>(mut reader: R, interrupts: &[u8]) -> Self
    where
        R: Read + Send + 'static,
    {
        let shared = Arc::new(Shared {
            input: Mutex::new(VecDeque::new()),
            closed: AtomicBool::new(false),
        });
        let interrupts = interrupts.to_vec();

        let pump = Arc::clone(&shared);
        thread::spawn(move || {
            let mut buf = [0u8; 1024];
            loop {
                let n = match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        tracing::debug!(error = %e, "Input reader stopped");
                        break;
                    }
                };
                let chunk = &buf[..n];
                match chunk.iter().position(|b| interrupts.contains(b)) {
                    Some(at) => {
                        tracing::debug!(byte = chunk[at], "Input interrupted");
                        pump.input.lock().extend(chunk[..at].iter().copied());
                        break;
                    }
                    None => pump.input.lock().extend(chunk.iter().copied()),
                }
            }
            pump.closed.store(true, Ordering::SeqCst);
        });

        Self { shared }
    }

    /// True once the reader hit EOF and every byte has been consumed.
    pub fn is_drained(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst) && self.shared.input.lock().is_empty()
    }
}

impl Stream for StdioStream {
    fn available(&self) -> usize {
        self.shared.input.lock().len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.shared.input.lock().pop_front()
    }
}

impl Write for StdioStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
