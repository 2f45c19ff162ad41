/// Returned by [`LineBuffer::push`] when no room is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full;

/// Fixed-capacity line accumulator with a terminator match cursor.
///
/// Storage is allocated once. One byte of the configured capacity stays
/// reserved, so at most `capacity - 1` bytes are ever buffered.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    capacity: usize,
    data: Box<[u8]>,
    len: usize,
    terminator: Box<[u8]>,
    matched: usize,
}

impl LineBuffer {
    pub fn new(capacity: usize, terminator: &[u8]) -> Self {
        Self {
            capacity,
            data: vec![0u8; capacity.saturating_sub(1)].into_boxed_slice(),
            len: 0,
            terminator: terminator.into(),
            matched: 0,
        }
    }

    /// Configured size, reserved byte included.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes that fit before an overflow.
    pub fn usable(&self) -> usize {
        self.data.len()
    }

    /// Bytes buffered since the last clear.
    pub fn position(&self) -> usize {
        self.len
    }

    /// Terminator bytes matched contiguously so far.
    pub fn term_position(&self) -> usize {
        self.matched
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn terminator(&self) -> &[u8] {
        &self.terminator
    }

    /// Buffered bytes.
    pub fn line(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn push(&mut self, byte: u8) -> Result<(), Full> {
        let slot = self.data.get_mut(self.len).ok_or(Full)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    /// Advance terminator matching with the byte just pushed.
    ///
    /// A mismatch resets the cursor without re-testing the byte against the
    /// terminator's start. On a full match the terminator is cut off the end
    /// of the line and `true` is returned.
    pub fn advance_terminator(&mut self, byte: u8) -> bool {
        if self.terminator.get(self.matched) != Some(&byte) {
            self.matched = 0;
            return false;
        }
        self.matched += 1;
        if self.matched < self.terminator.len() {
            return false;
        }
        self.len = self.len.saturating_sub(self.terminator.len());
        self.matched = 0;
        true
    }

    /// Replace the contents with `line`. The caller checks that it fits.
    pub fn load(&mut self, line: &[u8]) {
        self.clear();
        let n = line.len().min(self.data.len());
        self.data[..n].copy_from_slice(&line[..n]);
        self.len = n;
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.matched = 0;
    }
}
