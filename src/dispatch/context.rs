use std::borrow::Cow;
use std::io;

use super::tokens::Tokens;
use crate::error::{CommandError, InvalidLine};
use crate::stream::Stream;

/// What a handler sees while it runs.
///
/// Holds the token cursor for the line being dispatched and the attached
/// stream for replies. It only lives for the duration of one handler call.
pub struct Context<'a> {
    tokens: Tokens<'a>,
    stream: Option<&'a mut (dyn Stream + 'static)>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(tokens: Tokens<'a>, stream: Option<&'a mut (dyn Stream + 'static)>) -> Self {
        Self { tokens, stream }
    }

    /// Next delimiter-separated token, or `None` when the line is exhausted.
    pub fn next_token(&mut self) -> Option<&'a [u8]> {
        self.tokens.next()
    }

    /// Next token as text. Invalid UTF-8 is replaced.
    pub fn next_str(&mut self) -> Option<Cow<'a, str>> {
        self.next_token().map(String::from_utf8_lossy)
    }

    /// The attached stream, if any.
    pub fn stream(&mut self) -> Option<&mut (dyn Stream + 'static)> {
        self.stream.as_deref_mut()
    }

    /// Write `text` followed by CRLF to the attached stream.
    /// Does nothing when no stream is attached.
    pub fn reply(&mut self, text: &str) -> io::Result<()> {
        let Some(stream) = self.stream() else {
            return Ok(());
        };
        stream.write_all(text.as_bytes())?;
        stream.write_all(b"\r\n")?;
        stream.flush()
    }

    /// Injecting a line from inside a handler is always rejected; the
    /// current dispatch keeps its token cursor.
    pub fn process_line(&mut self, line: impl AsRef<[u8]>) -> Result<(), CommandError> {
        let line = String::from_utf8_lossy(line.as_ref());
        tracing::warn!(line = %line, "Rejected command line injected from a handler");
        Err(CommandError::InvalidInjection(InvalidLine::Reentrant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    #[test]
    fn reply_writes_crlf_line() {
        let peer = MemoryStream::new();
        let mut attached = peer.clone();
        let mut ctx = Context::new(Tokens::empty(), Some(&mut attached));

        ctx.reply("OK").unwrap();
        assert_eq!(peer.take_output_string(), "OK\r\n");
    }

    #[test]
    fn reply_without_stream_is_noop() {
        let mut ctx = Context::new(Tokens::empty(), None);
        assert!(ctx.reply("OK").is_ok());
        assert!(ctx.stream().is_none());
    }

    #[test]
    fn nested_injection_keeps_cursor() {
        let mut ctx = Context::new(Tokens::new(b"a b", b" "), None);
        assert_eq!(ctx.next_token(), Some(&b"a"[..]));
        assert_eq!(
            ctx.process_line("OTHER"),
            Err(CommandError::InvalidInjection(InvalidLine::Reentrant))
        );
        assert_eq!(ctx.next_str().as_deref(), Some("b"));
        assert_eq!(ctx.next_token(), None);
    }
}
