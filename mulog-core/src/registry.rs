use std::{borrow::Cow, fmt};

use chrono::{DateTime, Utc};

use crate::{
    config::MULOG_CONFIG,
    console::{self, ConsoleStreams},
    error::{Error, Result},
    format::{COLOR_RESET, color_prefix, format_line},
    log_writer::FileHandle,
    sink::{Level, LoggerType, Sink, Stream, TimeFormat, kind_of},
};

/// Non-owning handle to a sink stored in a [`LoggerRegistry`].
///
/// Handles are generational: once the sink is destroyed, every copy of its handle stops
/// resolving, even if the slot is reused by a later sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoggerId {
    index: u32,
    generation: u32,
}

/// A logger as seen by callers. `None` is the dummy logger.
pub type LoggerRef = Option<LoggerId>;

#[derive(Debug)]
struct Slot {
    generation: u32,
    sink: Option<Sink>,
}

/// Owns the nodes of one or more sink trees.
///
/// Split loggers refer to their children by handle, so destroying a split leaves the
/// children alive, and destroying a child turns it into a dummy for every split that
/// still refers to it.
#[derive(Debug)]
pub struct LoggerRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    console: Option<ConsoleStreams>,
    max_split_depth: usize,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            console: None,
            max_split_depth: MULOG_CONFIG.MAX_SPLIT_DEPTH,
        }
    }

    /// Console loggers of this registry write to `streams` instead of the process console.
    pub fn with_console_streams(self, streams: ConsoleStreams) -> Self {
        Self {
            console: Some(streams),
            ..self
        }
    }

    /// Overrides `MULOG_MAX_SPLIT_DEPTH` for this registry.
    pub fn with_max_split_depth(self, max_split_depth: usize) -> Self {
        Self {
            max_split_depth,
            ..self
        }
    }

    /// Number of live sinks.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `logger` resolves to a live sink. The dummy never does.
    pub fn contains(&self, logger: LoggerRef) -> bool {
        self.resolve(logger).is_some()
    }

    /// `None` once every one of the `u32::MAX + 1` slot indices is live.
    fn insert(&mut self, sink: Sink) -> LoggerRef {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.sink = Some(sink);
            return Some(LoggerId {
                index,
                generation: slot.generation,
            });
        }
        let index = next_index(self.slots.len())?;
        self.slots.push(Slot {
            generation: 0,
            sink: Some(sink),
        });
        Some(LoggerId {
            index,
            generation: 0,
        })
    }

    fn resolve(&self, logger: LoggerRef) -> Option<&Sink> {
        let id = logger?;
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.sink.as_ref()
    }

    fn resolve_mut(&mut self, logger: LoggerRef) -> Option<&mut Sink> {
        let id = logger?;
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.sink.as_mut()
    }

    fn console_streams(&self) -> &ConsoleStreams {
        match &self.console {
            Some(streams) => streams,
            None => console::init(),
        }
    }

    // ==================
    // Creation functions
    // ==================

    /// Logger writing to `handle`. Debug messages are dropped unless `with_debug` is set.
    pub fn create_file(
        &mut self,
        handle: FileHandle,
        time_format: TimeFormat,
        with_debug: bool,
    ) -> Result<LoggerRef> {
        let time_format = time_format.validate()?;
        Ok(self.insert(Sink::File {
            handle,
            time_format,
            with_debug,
        }))
    }

    /// Logger writing info/debug to stdout and error/warning to stderr.
    pub fn create_console(
        &mut self,
        time_format: TimeFormat,
        with_debug: bool,
        with_color: bool,
    ) -> Result<LoggerRef> {
        let time_format = time_format.validate()?;
        console::init();
        Ok(self.insert(Sink::Console {
            time_format,
            with_debug,
            with_color,
        }))
    }

    /// Logger forwarding every message to `left`, then to `right`.
    ///
    /// The children are not owned and are not checked for cycles.
    pub fn create_split(&mut self, left: LoggerRef, right: LoggerRef) -> LoggerRef {
        self.insert(Sink::Split { left, right })
    }

    pub fn create_dummy() -> LoggerRef {
        None
    }

    // ===================
    // Messaging functions
    // ===================

    pub fn error(&self, logger: LoggerRef, args: fmt::Arguments<'_>) {
        self.log(logger, Level::Error, args);
    }

    pub fn warning(&self, logger: LoggerRef, args: fmt::Arguments<'_>) {
        self.log(logger, Level::Warning, args);
    }

    pub fn info(&self, logger: LoggerRef, args: fmt::Arguments<'_>) {
        self.log(logger, Level::Info, args);
    }

    /// Only emitted by sinks with `with_debug` set.
    pub fn debug(&self, logger: LoggerRef, args: fmt::Arguments<'_>) {
        self.log(logger, Level::Debug, args);
    }

    /// Formats `args` once and sends the result through the tree rooted at `logger`.
    pub fn log(&self, logger: LoggerRef, level: Level, args: fmt::Arguments<'_>) {
        if !self.contains(logger) {
            return;
        }
        let message = match args.as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(args.to_string()),
        };
        self.dispatch(logger, level, &message, Utc::now(), 0);
    }

    /// Sends an already formatted message through the tree rooted at `logger`.
    pub fn emit(&self, logger: LoggerRef, level: Level, message: &str) {
        self.dispatch(logger, level, message, Utc::now(), 0);
    }

    fn dispatch(
        &self,
        logger: LoggerRef,
        level: Level,
        message: &str,
        now: DateTime<Utc>,
        depth: usize,
    ) {
        let Some(sink) = self.resolve(logger) else {
            return;
        };
        if !sink.accepts(level) {
            return;
        }
        match sink {
            Sink::File {
                handle,
                time_format,
                ..
            } => {
                if let Some(line) = format_line(*time_format, level, message, now) {
                    handle.write_bytes(line.as_bytes()).ok();
                }
            }
            Sink::Console {
                time_format,
                with_color,
                ..
            } => {
                let Some(line) = format_line(*time_format, level, message, now) else {
                    return;
                };
                let stream = self.console_streams().get(level.stream());
                let written = if *with_color {
                    stream.write_wrapped(&color_prefix(level), &line, COLOR_RESET)
                } else {
                    stream.write_bytes(line.as_bytes())
                };
                written.ok();
            }
            Sink::Split { left, right } => {
                if depth >= self.max_split_depth {
                    return;
                }
                self.dispatch(*left, level, message, now, depth + 1);
                self.dispatch(*right, level, message, now, depth + 1);
            }
        }
    }

    /// Writes `bytes` as they are: no timestamp, tag, color or debug gating.
    /// Console loggers write to stdout.
    pub fn append(&self, logger: LoggerRef, bytes: &[u8]) -> Result<()> {
        self.append_at(logger, bytes, 0)
    }

    fn append_at(&self, logger: LoggerRef, bytes: &[u8], depth: usize) -> Result<()> {
        match self.resolve(logger) {
            None => Ok(()),
            Some(Sink::File { handle, .. }) => Ok(handle.write_bytes(bytes)?),
            Some(Sink::Console { .. }) => Ok(self
                .console_streams()
                .get(Stream::Stdout)
                .write_bytes(bytes)?),
            Some(Sink::Split { left, right }) => {
                if depth >= self.max_split_depth {
                    return Ok(());
                }
                let left = self.append_at(*left, bytes, depth + 1);
                let right = self.append_at(*right, bytes, depth + 1);
                left.and(right)
            }
        }
    }

    // =======================================
    // Logger query and modification functions
    // =======================================

    pub fn get_type(&self, logger: LoggerRef) -> LoggerType {
        kind_of(self.resolve(logger))
    }

    /// Handle of a file logger, `None` for every other logger.
    pub fn get_file(&self, logger: LoggerRef) -> Option<FileHandle> {
        match self.resolve(logger)? {
            Sink::File { handle, .. } => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn set_file(&mut self, logger: LoggerRef, handle: FileHandle) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(Sink::File { handle: current, .. }) => {
                *current = handle;
                Ok(())
            }
            other => Err(Error::type_mismatch("set_file", kind_of(other.as_deref()))),
        }
    }

    /// `None` for split and dummy loggers.
    pub fn get_with_debug(&self, logger: LoggerRef) -> Option<bool> {
        match self.resolve(logger)? {
            Sink::File { with_debug, .. } | Sink::Console { with_debug, .. } => Some(*with_debug),
            Sink::Split { .. } => None,
        }
    }

    pub fn set_with_debug(&mut self, logger: LoggerRef, with_debug: bool) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(Sink::File { with_debug: flag, .. } | Sink::Console { with_debug: flag, .. }) => {
                *flag = with_debug;
                Ok(())
            }
            other => Err(Error::type_mismatch(
                "set_with_debug",
                kind_of(other.as_deref()),
            )),
        }
    }

    /// `None` for everything but console loggers.
    pub fn get_with_color(&self, logger: LoggerRef) -> Option<bool> {
        match self.resolve(logger)? {
            Sink::Console { with_color, .. } => Some(*with_color),
            _ => None,
        }
    }

    pub fn set_with_color(&mut self, logger: LoggerRef, with_color: bool) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(Sink::Console { with_color: flag, .. }) => {
                *flag = with_color;
                Ok(())
            }
            other => Err(Error::type_mismatch(
                "set_with_color",
                kind_of(other.as_deref()),
            )),
        }
    }

    pub fn get_timefmt(&self, logger: LoggerRef) -> TimeFormat {
        match self.resolve(logger) {
            Some(Sink::File { time_format, .. } | Sink::Console { time_format, .. }) => {
                *time_format
            }
            _ => TimeFormat::NotApplicable,
        }
    }

    pub fn set_timefmt(&mut self, logger: LoggerRef, time_format: TimeFormat) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(
                Sink::File {
                    time_format: current,
                    ..
                }
                | Sink::Console {
                    time_format: current,
                    ..
                },
            ) => {
                *current = time_format.validate()?;
                Ok(())
            }
            other => Err(Error::type_mismatch("set_timefmt", kind_of(other.as_deref()))),
        }
    }

    /// Left child of a split logger, `None` for every other logger.
    pub fn get_left(&self, logger: LoggerRef) -> LoggerRef {
        match self.resolve(logger)? {
            Sink::Split { left, .. } => *left,
            _ => None,
        }
    }

    /// Right child of a split logger, `None` for every other logger.
    pub fn get_right(&self, logger: LoggerRef) -> LoggerRef {
        match self.resolve(logger)? {
            Sink::Split { right, .. } => *right,
            _ => None,
        }
    }

    pub fn set_left(&mut self, logger: LoggerRef, left: LoggerRef) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(Sink::Split { left: current, .. }) => {
                *current = left;
                Ok(())
            }
            other => Err(Error::type_mismatch("set_left", kind_of(other.as_deref()))),
        }
    }

    pub fn set_right(&mut self, logger: LoggerRef, right: LoggerRef) -> Result<()> {
        match self.resolve_mut(logger) {
            Some(Sink::Split { right: current, .. }) => {
                *current = right;
                Ok(())
            }
            other => Err(Error::type_mismatch("set_right", kind_of(other.as_deref()))),
        }
    }

    // ====================
    // Destruction function
    // ====================

    /// Frees the node of `logger`. File handles and split children are left untouched.
    pub fn destroy(&mut self, logger: LoggerRef) {
        let Some(id) = logger else {
            return;
        };
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return;
        };
        if slot.generation != id.generation || slot.sink.is_none() {
            return;
        }
        slot.sink = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }
}

fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}
