//! # mulog-core
//! Core sink tree for mulog: file, console, split and dummy loggers.
//!
//! Loggers live in a [`LoggerRegistry`] and are addressed by [`LoggerRef`] handles.
//! A split logger forwards each message to two other loggers, which may themselves be
//! splits, so any tree of destinations can be built.
//!
//! ```rust
//! use mulog_core::{FileHandle, LoggerRegistry, SharedBuffer, TimeFormat};
//!
//! let mut registry = LoggerRegistry::new();
//! let buffer = SharedBuffer::new();
//! let file = registry
//!     .create_file(FileHandle::new(buffer.clone()), TimeFormat::Fixed, false)
//!     .unwrap();
//! let split = registry.create_split(file, LoggerRegistry::create_dummy());
//! registry.error(split, format_args!("code={}", 42));
//! assert!(buffer.contents().ends_with("] ERROR: code=42\n"));
//! ```

mod config;
pub mod console;
mod error;
pub mod format;
mod log_writer;
mod registry;
mod sink;

pub use config::{MULOG_CONFIG, MulogConfig};
pub use console::ConsoleStreams;
pub use error::{Error, Result, Status};
pub use log_writer::{FileHandle, SharedBuffer};
pub use registry::{LoggerId, LoggerRef, LoggerRegistry};
pub use sink::{Level, LoggerType, Stream, TimeFormat};
