use std::sync::OnceLock;

use crate::{log_writer::FileHandle, sink::Stream};

static CONSOLE: OnceLock<ConsoleStreams> = OnceLock::new();

/// The pair of destinations console loggers write to.
#[derive(Debug, Clone)]
pub struct ConsoleStreams {
    pub stdout: FileHandle,
    pub stderr: FileHandle,
}

impl ConsoleStreams {
    pub fn new(stdout: FileHandle, stderr: FileHandle) -> Self {
        Self { stdout, stderr }
    }

    pub fn get(&self, stream: Stream) -> &FileHandle {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }
}

/// Process-wide console streams, set up on first use.
pub fn init() -> &'static ConsoleStreams {
    CONSOLE.get_or_init(|| {
        enable_escape_sequences();
        ConsoleStreams::new(FileHandle::stdout(), FileHandle::stderr())
    })
}

#[cfg(windows)]
fn enable_escape_sequences() {
    // Older consoles refuse; colors then show up as raw escapes.
    colored::control::set_virtual_terminal(true).ok();
}

#[cfg(not(windows))]
fn enable_escape_sequences() {}

#[test]
fn test_init_is_idempotent() {
    let first = init();
    let second = init();
    assert!(std::ptr::eq(first, second));
    assert!(first.get(Stream::Stdout).ptr_eq(&second.stdout));
    assert!(!first.get(Stream::Stdout).ptr_eq(first.get(Stream::Stderr)));
}
