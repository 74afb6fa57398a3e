use mulog_core::{Level, LoggerRef, LoggerRegistry};

use crate::text::IssueText;

/// Eight-step severity scale, from the chattiest to the most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    VerboseDebug = 0,
    Debug = 1,
    VerboseInfo = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Critical = 6,
    Catastrophic = 7,
}

impl Severity {
    /// Sink level a message of this severity is written with.
    pub fn level(self) -> Level {
        match self {
            Severity::VerboseDebug | Severity::Debug => Level::Debug,
            Severity::VerboseInfo | Severity::Info => Level::Info,
            Severity::Warning => Level::Warning,
            Severity::Error | Severity::Critical | Severity::Catastrophic => Level::Error,
        }
    }
}

/// Whether a message of `requested` severity passes a `filter`.
pub const fn is_active(requested: Severity, filter: Severity) -> bool {
    requested as u8 >= filter as u8
}

/// Severity-filtered view on one logger of a registry.
///
/// The filter runs before the sink's own flags, so a debug message needs both a low
/// enough filter and a sink with debug output enabled.
pub struct SeverityLogger<'r> {
    registry: &'r LoggerRegistry,
    sink: LoggerRef,
    filter: Severity,
}

impl<'r> SeverityLogger<'r> {
    /// Starts with the lowest filter, letting every severity through.
    pub fn new(registry: &'r LoggerRegistry, sink: LoggerRef) -> Self {
        Self {
            registry,
            sink,
            filter: Severity::VerboseDebug,
        }
    }

    pub fn with_severity(self, filter: Severity) -> Self {
        Self { filter, ..self }
    }

    pub fn sink(&self) -> LoggerRef {
        self.sink
    }

    pub fn severity(&self) -> Severity {
        self.filter
    }

    pub fn set_severity(&mut self, filter: Severity) {
        self.filter = filter;
    }

    pub fn will_issue(&self, requested: Severity) -> bool {
        is_active(requested, self.filter)
    }

    pub fn issue(&self, severity: Severity, text: impl IssueText) {
        if !self.will_issue(severity) {
            return;
        }
        self.registry
            .emit(self.sink, severity.level(), &text.to_text());
    }

    pub fn vdbg(&self, text: impl IssueText) {
        self.issue(Severity::VerboseDebug, text);
    }

    pub fn dbg(&self, text: impl IssueText) {
        self.issue(Severity::Debug, text);
    }

    pub fn vinfo(&self, text: impl IssueText) {
        self.issue(Severity::VerboseInfo, text);
    }

    pub fn info(&self, text: impl IssueText) {
        self.issue(Severity::Info, text);
    }

    pub fn warn(&self, text: impl IssueText) {
        self.issue(Severity::Warning, text);
    }

    pub fn err(&self, text: impl IssueText) {
        self.issue(Severity::Error, text);
    }

    pub fn critical(&self, text: impl IssueText) {
        self.issue(Severity::Critical, text);
    }

    pub fn catastrophic(&self, text: impl IssueText) {
        self.issue(Severity::Catastrophic, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulog_core::{FileHandle, SharedBuffer, TimeFormat};

    #[test]
    fn test_is_active() {
        assert!(is_active(Severity::Error, Severity::Info));
        assert!(is_active(Severity::Info, Severity::Info));
        assert!(!is_active(Severity::VerboseInfo, Severity::Info));
        assert!(Severity::Catastrophic > Severity::Critical);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(Severity::VerboseDebug.level(), Level::Debug);
        assert_eq!(Severity::VerboseInfo.level(), Level::Info);
        assert_eq!(Severity::Warning.level(), Level::Warning);
        assert_eq!(Severity::Critical.level(), Level::Error);
        assert_eq!(Severity::Catastrophic.level(), Level::Error);
    }

    #[test]
    fn test_filter_and_shortcuts() {
        let mut registry = LoggerRegistry::new();
        let buffer = SharedBuffer::new();
        let file = registry
            .create_file(FileHandle::new(buffer.clone()), TimeFormat::Fixed, true)
            .unwrap();
        let mut logger = SeverityLogger::new(&registry, file).with_severity(Severity::Warning);
        logger.dbg("skipped");
        logger.vinfo("skipped");
        logger.info("skipped");
        logger.warn("careful");
        logger.critical(String::from("on fire"));
        let wide: Vec<u16> = "wide".encode_utf16().collect();
        logger.catastrophic(&wide[..]);
        let contents = buffer.take();
        assert!(!contents.contains("skipped"));
        assert!(contents.contains("] WARNING: careful\n"));
        assert!(contents.contains("] ERROR: on fire\n"));
        assert!(contents.contains("] ERROR: wide\n"));

        logger.set_severity(Severity::VerboseDebug);
        assert_eq!(logger.severity(), Severity::VerboseDebug);
        logger.vdbg("verbose");
        logger.vinfo("chatty");
        logger.err("bad");
        let contents = buffer.take();
        assert!(contents.contains("] DEBUG: verbose\n"));
        assert!(contents.contains("] INFO: chatty\n"));
        assert!(contents.contains("] ERROR: bad\n"));
    }

    #[test]
    fn test_sink_flags_still_apply() {
        let mut registry = LoggerRegistry::new();
        let buffer = SharedBuffer::new();
        let file = registry
            .create_file(FileHandle::new(buffer.clone()), TimeFormat::Fixed, false)
            .unwrap();
        let logger = SeverityLogger::new(&registry, file);
        assert!(logger.will_issue(Severity::VerboseDebug));
        logger.dbg("gated by the sink");
        assert!(buffer.is_empty());
        assert_eq!(logger.sink(), file);
    }
}
