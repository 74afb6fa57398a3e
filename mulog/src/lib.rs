//! # mulog
//! Composable leveled logger: file, console, split and dummy sinks.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! mulog = "0.2.0"
//! ```
//!
//! ```rust
//! use mulog::{FileHandle, LoggerRegistry, SharedBuffer, TimeFormat};
//!
//! let mut registry = LoggerRegistry::new();
//! let buffer = SharedBuffer::new();
//! let file = registry
//!     .create_file(FileHandle::new(buffer.clone()), TimeFormat::Fixed, true)
//!     .unwrap();
//! mulog::error!(registry, file, "code={}", 42);
//! assert!(buffer.contents().ends_with("] ERROR: code=42\n"));
//! ```
//!
//! ## Splitting output
//! A split logger sends each message to its left logger, then to its right one.
//! Each child keeps its own time format, debug switch and color switch.
//!
//! ```rust
//! use mulog::{FileHandle, LoggerRegistry, TimeFormat};
//!
//! let path = std::env::temp_dir().join("mulog_app.log");
//! let mut registry = LoggerRegistry::new();
//! let file = registry
//!     .create_file(FileHandle::open(path).unwrap(), TimeFormat::Fixed, true)
//!     .unwrap();
//! let console = registry.create_console(TimeFormat::Short, false, true).unwrap();
//! let both = registry.create_split(file, console);
//! mulog::info!(registry, both, "Hello, world!");
//! mulog::debug!(registry, both, "only in the file");
//! // the split node can go, its children stay usable
//! registry.destroy(both);
//! mulog::warning!(registry, console, "still there");
//! ```
//!
//! ## Severity shortcuts
//! ```rust
//! use mulog::{LoggerRegistry, Severity, SeverityLogger, TimeFormat};
//!
//! let mut registry = LoggerRegistry::new();
//! let console = registry.create_console(TimeFormat::Fixed, true, false).unwrap();
//! let logger = SeverityLogger::new(&registry, console).with_severity(Severity::Info);
//! logger.vinfo("dropped by the filter");
//! logger.warn("Hello, world!");
//! let wide: Vec<u16> = "wide text".encode_utf16().collect();
//! logger.err(wide);
//! ```
//!
//! ## `log` crate integration
//! ```rust
//! use mulog::logger_config;
//!
//! let registry = logger_config()
//!     .with_level(log::LevelFilter::Debug)
//!     .init_global()
//!     .expect("Unable to install logger");
//! log::info!("Hello, world!");
//! ```

mod bridge;
mod severity;
mod text;

pub use bridge::{
    ConfigBuilder, InitError, MulogLogger, SharedRegistry, level_from_log, logger_config,
};
pub use mulog_core::{
    ConsoleStreams, Error, FileHandle, Level, LoggerId, LoggerRef, LoggerRegistry, LoggerType,
    MULOG_CONFIG, Result, SharedBuffer, Status, Stream, TimeFormat, console, format,
};
pub use severity::{Severity, SeverityLogger, is_active};
pub use text::IssueText;

/// `mulog::error!(registry, logger, "code={}", 42)`
#[macro_export]
macro_rules! error {
    ($registry:expr, $logger:expr, $($arg:tt)+) => {
        $registry.error($logger, format_args!($($arg)+))
    };
}

/// `mulog::warning!(registry, logger, "{} retries left", n)`
#[macro_export]
macro_rules! warning {
    ($registry:expr, $logger:expr, $($arg:tt)+) => {
        $registry.warning($logger, format_args!($($arg)+))
    };
}

/// `mulog::info!(registry, logger, "listening on {addr}")`
#[macro_export]
macro_rules! info {
    ($registry:expr, $logger:expr, $($arg:tt)+) => {
        $registry.info($logger, format_args!($($arg)+))
    };
}

/// Written only by sinks with debug output enabled.
#[macro_export]
macro_rules! debug {
    ($registry:expr, $logger:expr, $($arg:tt)+) => {
        $registry.debug($logger, format_args!($($arg)+))
    };
}
