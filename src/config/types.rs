use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Line scanner settings. Fixed once a reader is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Total buffer size in bytes, one of which stays reserved (default: 64).
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// Byte sequence that ends a line (default: "\r\n").
    #[serde(default = "default_terminator")]
    pub terminator: String,
    /// Bytes that separate tokens within a line (default: " ").
    #[serde(default = "default_delimiters")]
    pub delimiters: String,
}

/// Console driver settings used by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Delay between two drains of the input stream (default: 10).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Put the terminal in raw mode so bytes arrive as typed (default: false).
    #[serde(default)]
    pub raw_mode: bool,
    /// Line terminator used by the console in place of `[scanner].terminator`.
    /// When unset the console picks what the terminal sends for Enter:
    /// "\n" in cooked mode, "\r" in raw mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminator: Option<String>,
}

fn default_buffer_capacity() -> usize {
    64
}

fn default_terminator() -> String {
    "\r\n".to_string()
}

fn default_delimiters() -> String {
    " ".to_string()
}

fn default_poll_interval_ms() -> u64 {
    10
}

impl ScannerConfig {
    /// Bytes a line may occupy, terminator included.
    pub fn usable_capacity(&self) -> usize {
        self.buffer_capacity.saturating_sub(1)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            terminator: default_terminator(),
            delimiters: default_delimiters(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            raw_mode: false,
            terminator: None,
        }
    }
}
