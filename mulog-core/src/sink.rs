use std::fmt;

use colored::Color;

use crate::{
    error::{Error, Result},
    log_writer::FileHandle,
    registry::LoggerRef,
};

/// The variant of a logger, as reported by [`LoggerRegistry::get_type`](crate::LoggerRegistry::get_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggerType {
    /// Outputs to a file handle.
    File,
    /// Outputs to stdout/stderr, optionally with color.
    Console,
    /// Sends every message to two other loggers.
    Split,
    /// Discards everything.
    Dummy,
}

impl fmt::Display for LoggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoggerType::File => "file",
            LoggerType::Console => "console",
            LoggerType::Split => "split",
            LoggerType::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

/// Controls how the timestamp of a line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TimeFormat {
    /// Local time, `%c %Z`.
    Long = 0,
    /// Local time, `%x %X %Z`.
    Short = 1,
    /// UTC time, `%Y-%m-%d %H:%M:%S`.
    Fixed = 2,
    /// Returned for loggers without a time format (split and dummy).
    /// Never accepted by constructors or setters.
    NotApplicable = 3,
}

impl TimeFormat {
    pub const VALID: [TimeFormat; 3] = [TimeFormat::Long, TimeFormat::Short, TimeFormat::Fixed];

    pub fn is_applicable(self) -> bool {
        self != TimeFormat::NotApplicable
    }

    pub(crate) fn validate(self) -> Result<Self> {
        if self.is_applicable() {
            Ok(self)
        } else {
            Err(Error::InvalidArgument(
                "time format `NotApplicable` cannot be assigned to a logger".into(),
            ))
        }
    }
}

impl TryFrom<i32> for TimeFormat {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(TimeFormat::Long),
            1 => Ok(TimeFormat::Short),
            2 => Ok(TimeFormat::Fixed),
            3 => Ok(TimeFormat::NotApplicable),
            other => Err(Error::InvalidArgument(format!(
                "{other} is not a valid time format"
            ))),
        }
    }
}

/// Physical console stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Severity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Error,
    Warning,
    Info,
    Debug,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Error, Level::Warning, Level::Info, Level::Debug];

    /// Tag written between the timestamp and the message.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// Console color, rendered bright.
    pub fn color(self) -> Color {
        match self {
            Level::Error => Color::Red,
            Level::Warning => Color::Magenta,
            Level::Info => Color::Cyan,
            Level::Debug => Color::White,
        }
    }

    pub fn stream(self) -> Stream {
        match self {
            Level::Error | Level::Warning => Stream::Stderr,
            Level::Info | Level::Debug => Stream::Stdout,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node of the sink tree. The dummy sink has no node: it is the `None` [`LoggerRef`].
#[derive(Debug, Clone)]
pub(crate) enum Sink {
    File {
        handle: FileHandle,
        time_format: TimeFormat,
        with_debug: bool,
    },
    Console {
        time_format: TimeFormat,
        with_debug: bool,
        with_color: bool,
    },
    Split {
        left: LoggerRef,
        right: LoggerRef,
    },
}

impl Sink {
    pub fn kind(&self) -> LoggerType {
        match self {
            Sink::File { .. } => LoggerType::File,
            Sink::Console { .. } => LoggerType::Console,
            Sink::Split { .. } => LoggerType::Split,
        }
    }

    /// Debug gating. Splits always pass; their children decide.
    pub(crate) fn accepts(&self, level: Level) -> bool {
        match self {
            Sink::File { with_debug, .. } | Sink::Console { with_debug, .. } => {
                level != Level::Debug || *with_debug
            }
            Sink::Split { .. } => true,
        }
    }
}

pub(crate) fn kind_of(sink: Option<&Sink>) -> LoggerType {
    sink.map_or(LoggerType::Dummy, Sink::kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format_from_raw() {
        assert_eq!(TimeFormat::try_from(0).unwrap(), TimeFormat::Long);
        assert_eq!(TimeFormat::try_from(2).unwrap(), TimeFormat::Fixed);
        assert_eq!(TimeFormat::try_from(3).unwrap(), TimeFormat::NotApplicable);
        assert!(matches!(
            TimeFormat::try_from(7),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            TimeFormat::try_from(-1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_level_routing() {
        assert_eq!(Level::Error.stream(), Stream::Stderr);
        assert_eq!(Level::Warning.stream(), Stream::Stderr);
        assert_eq!(Level::Info.stream(), Stream::Stdout);
        assert_eq!(Level::Debug.stream(), Stream::Stdout);
        assert_eq!(Level::Warning.color(), Color::Magenta);
    }

    #[test]
    fn test_debug_gating() {
        let console = Sink::Console {
            time_format: TimeFormat::Fixed,
            with_debug: false,
            with_color: false,
        };
        assert!(console.accepts(Level::Error));
        assert!(!console.accepts(Level::Debug));
        let split = Sink::Split {
            left: None,
            right: None,
        };
        assert!(split.accepts(Level::Debug));
        assert_eq!(kind_of(None), LoggerType::Dummy);
        assert_eq!(kind_of(Some(&split)), LoggerType::Split);
    }
}
