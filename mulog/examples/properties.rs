use mulog::{FileHandle, LoggerRegistry, TimeFormat};

fn main() -> mulog::Result<()> {
    let path = std::env::temp_dir().join("mulog_properties.log");
    let file = FileHandle::open(&path)?;

    let mut registry = LoggerRegistry::new();
    let verbose_file = registry.create_file(file.clone(), TimeFormat::Long, true)?;
    let quiet_file = registry.create_file(file, TimeFormat::Short, false)?;
    let verbose_console = registry.create_console(TimeFormat::Fixed, true, true)?;
    let quiet_console = registry.create_console(TimeFormat::Long, false, false)?;
    let split = registry.create_split(quiet_file, quiet_console);
    let dummy = LoggerRegistry::create_dummy();
    let all = [
        verbose_file,
        quiet_file,
        verbose_console,
        quiet_console,
        split,
        dummy,
    ];

    println!("=== Properties ===\n");
    for (i, &logger) in all.iter().enumerate() {
        println!("{i}[type]: {}", registry.get_type(logger));
        println!("{i}[file]: {:?}", registry.get_file(logger));
        println!("{i}[wdbg]: {:?}", registry.get_with_debug(logger));
        println!("{i}[wclr]: {:?}", registry.get_with_color(logger));
        println!("{i}[tfmt]: {:?}", registry.get_timefmt(logger));
        println!("{i}[left]: {:?}", registry.get_left(logger));
        println!("{i}[rite]: {:?}", registry.get_right(logger));
        println!();

        // Write every property back to itself and report what the logger accepts.
        let file = match registry.get_file(logger) {
            Some(handle) => registry.set_file(logger, handle),
            None => registry.set_file(logger, FileHandle::stdout()),
        };
        let with_debug = registry.set_with_debug(
            logger,
            registry.get_with_debug(logger).unwrap_or_default(),
        );
        let with_color = registry.set_with_color(
            logger,
            registry.get_with_color(logger).unwrap_or_default(),
        );
        let time_format = registry.set_timefmt(logger, registry.get_timefmt(logger));
        let left = registry.set_left(logger, registry.get_left(logger));
        let right = registry.set_right(logger, registry.get_right(logger));
        for (name, status) in [
            ("file", file),
            ("wdbg", with_debug),
            ("wclr", with_color),
            ("tfmt", time_format),
            ("left", left),
            ("rite", right),
        ] {
            match status {
                Ok(()) => println!("{i}[{name}=] -> ok"),
                Err(err) => println!("{i}[{name}=] -> {:?}: {err}", err.status()),
            }
        }
        println!();
    }

    println!("\n=== Logging ===\n");
    for (i, &logger) in all.iter().enumerate() {
        println!("log {i}");
        mulog::error!(registry, logger, "mulog error {i}");
        mulog::warning!(registry, logger, "mulog warning {i}");
        mulog::info!(registry, logger, "mulog info {i}");
        mulog::debug!(registry, logger, "mulog debug {i}");
    }

    for logger in all {
        registry.destroy(logger);
    }
    println!("\nfile output written to {}", path.display());
    Ok(())
}
