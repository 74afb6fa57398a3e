use log::LevelFilter;
use mulog::{
    FileHandle, InitError, LoggerRegistry, SharedBuffer, SharedRegistry, TimeFormat,
    logger_config,
};
use regex::Regex;

// One test only: the `log` backend can be installed once per process.
#[test]
fn test_log_records_fan_out_through_global_logger() {
    let registry = SharedRegistry::default();
    let primary = SharedBuffer::new();
    let verbose = SharedBuffer::new();
    let root = {
        let mut registry = registry.write().unwrap();
        let primary = registry
            .create_file(FileHandle::new(primary.clone()), TimeFormat::Fixed, false)
            .unwrap();
        let verbose = registry
            .create_file(FileHandle::new(verbose.clone()), TimeFormat::Fixed, true)
            .unwrap();
        registry.create_split(primary, verbose)
    };

    let shared = logger_config()
        .with_registry(registry.clone())
        .with_root(root)
        .with_level(LevelFilter::Debug)
        .init_global()
        .unwrap();

    log::error!("code={}", 42);
    log::debug!("details");
    log::trace!("never forwarded");

    let line = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] ERROR: code=42$").unwrap();
    let primary_contents = primary.contents();
    let primary_lines: Vec<&str> = primary_contents.lines().collect();
    assert_eq!(primary_lines.len(), 1);
    assert!(line.is_match(primary_lines[0]));
    let verbose_contents = verbose.contents();
    assert!(verbose_contents.contains("] DEBUG: details\n"));
    assert!(!verbose_contents.contains("never forwarded"));

    // The installed logger still sees changes made to the registry.
    let mut guard = shared.write().unwrap();
    let left = guard.get_left(root);
    guard.set_with_debug(left, true).unwrap();
    drop(guard);
    log::debug!("now everywhere");
    assert!(primary.contents().ends_with("] DEBUG: now everywhere\n"));

    let second = logger_config()
        .with_root(LoggerRegistry::create_dummy())
        .init_global();
    assert!(matches!(second, Err(InitError::SetLogger(_))));
}
