use std::sync::{Arc, PoisonError, RwLock};

use log::{LevelFilter, Log};
use mulog_core::{Level, LoggerRef, LoggerRegistry, TimeFormat};
use thiserror::Error;

/// Registry shared between the application and the installed [`MulogLogger`].
pub type SharedRegistry = Arc<RwLock<LoggerRegistry>>;

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Sink(#[from] mulog_core::Error),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

/// Sink level a `log` record is written with. `Trace` shares the debug level.
pub fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// `log` implementation sending every record through one sink tree.
pub struct MulogLogger {
    registry: SharedRegistry,
    root: LoggerRef,
    level: LevelFilter,
}

impl MulogLogger {
    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }

    pub fn root(&self) -> LoggerRef {
        self.root
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Log for MulogLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.log(
            self.root,
            level_from_log(record.level()),
            format_args!("{}", record.args()),
        );
    }

    fn flush(&self) {}
}

/// Builder for configuring and installing the logger.
pub struct ConfigBuilder {
    registry: Option<SharedRegistry>,
    root: Option<LoggerRef>,
    level: LevelFilter,
    time_format: TimeFormat,
    with_color: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            registry: None,
            root: None,
            level: LevelFilter::Info,
            time_format: TimeFormat::Fixed,
            with_color: true,
        }
    }
}

impl ConfigBuilder {
    /// Uses an existing registry instead of a fresh one.
    pub fn with_registry(self, registry: SharedRegistry) -> Self {
        Self {
            registry: Some(registry),
            ..self
        }
    }
    /// Sends records to `root`. Without it, a console logger is created.
    pub fn with_root(self, root: LoggerRef) -> Self {
        Self {
            root: Some(root),
            ..self
        }
    }
    /// Maximum level of forwarded records.
    pub fn with_level(self, level: LevelFilter) -> Self {
        Self { level, ..self }
    }
    /// Time format of the default console logger.
    pub fn with_time_format(self, time_format: TimeFormat) -> Self {
        Self {
            time_format,
            ..self
        }
    }
    /// Colors of the default console logger.
    pub fn with_color(self, yes: bool) -> Self {
        Self {
            with_color: yes,
            ..self
        }
    }
    pub fn no_color(self) -> Self {
        self.with_color(false)
    }

    pub fn build(self) -> Result<MulogLogger, InitError> {
        let Self {
            registry,
            root,
            level,
            time_format,
            with_color,
        } = self;
        let registry = registry.unwrap_or_default();
        let root = match root {
            Some(root) => root,
            None => registry
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .create_console(time_format, level >= LevelFilter::Debug, with_color)?,
        };
        Ok(MulogLogger {
            registry,
            root,
            level,
        })
    }

    /// Installs the logger as the `log` backend.
    /// Returns the registry so sinks can still be adjusted afterwards.
    pub fn init_global(self) -> Result<SharedRegistry, InitError> {
        let logger = self.build()?;
        let registry = logger.registry();
        let level = logger.level;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(registry)
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulog_core::{FileHandle, LoggerType, SharedBuffer};

    fn record_at(logger: &MulogLogger, level: log::Level, message: &str) {
        logger.log(
            &log::Record::builder()
                .level(level)
                .target("mulog::tests")
                .args(format_args!("{message}"))
                .build(),
        );
    }

    #[test]
    fn test_records_reach_the_root() {
        let registry = SharedRegistry::default();
        let buffer = SharedBuffer::new();
        let root = registry
            .write()
            .unwrap()
            .create_file(FileHandle::new(buffer.clone()), TimeFormat::Fixed, true)
            .unwrap();
        let logger = logger_config()
            .with_registry(Arc::clone(&registry))
            .with_root(root)
            .with_level(LevelFilter::Debug)
            .build()
            .unwrap();
        record_at(&logger, log::Level::Warn, "careful");
        record_at(&logger, log::Level::Debug, "details");
        record_at(&logger, log::Level::Trace, "filtered out");
        let contents = buffer.contents();
        assert!(contents.contains("] WARNING: careful\n"));
        assert!(contents.contains("] DEBUG: details\n"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_default_root_is_console() {
        let logger = logger_config()
            .with_level(LevelFilter::Trace)
            .with_time_format(TimeFormat::Short)
            .no_color()
            .build()
            .unwrap();
        let registry = logger.registry();
        let registry = registry.read().unwrap();
        assert_eq!(registry.get_type(logger.root()), LoggerType::Console);
        assert_eq!(registry.get_with_debug(logger.root()), Some(true));
        assert_eq!(registry.get_with_color(logger.root()), Some(false));
        assert_eq!(registry.get_timefmt(logger.root()), TimeFormat::Short);
    }

    #[test]
    fn test_invalid_time_format() {
        let result = logger_config()
            .with_time_format(TimeFormat::NotApplicable)
            .build();
        assert!(matches!(result, Err(InitError::Sink(_))));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from_log(log::Level::Error), Level::Error);
        assert_eq!(level_from_log(log::Level::Warn), Level::Warning);
        assert_eq!(level_from_log(log::Level::Info), Level::Info);
        assert_eq!(level_from_log(log::Level::Trace), Level::Debug);
    }
}
