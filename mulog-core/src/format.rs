//! Line decoration: timestamps, level tags and console colors.

use chrono::{DateTime, Local, Utc};

use crate::sink::{Level, TimeFormat};

const LONG: &str = "%c %Z";
const SHORT: &str = "%x %X %Z";
const FIXED: &str = "%Y-%m-%d %H:%M:%S";

/// Escape sequence restoring the default console color.
pub const COLOR_RESET: &str = "\x1b[0m";

/// Renders `now` in the given format. `Long` and `Short` use local time, `Fixed` stays in UTC.
pub fn render_timestamp(format: TimeFormat, now: DateTime<Utc>) -> Option<String> {
    let rendered = match format {
        TimeFormat::Long => now.with_timezone(&Local).format(LONG).to_string(),
        TimeFormat::Short => now.with_timezone(&Local).format(SHORT).to_string(),
        TimeFormat::Fixed => now.format(FIXED).to_string(),
        TimeFormat::NotApplicable => return None,
    };
    Some(rendered)
}

/// `[<timestamp>] <TAG>: <message>\n`
pub fn format_line(
    format: TimeFormat,
    level: Level,
    message: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    let time = render_timestamp(format, now)?;
    Some(format!("[{time}] {}: {message}\n", level.tag()))
}

/// Bright foreground color of `level`.
pub fn color_prefix(level: Level) -> String {
    format!("\x1b[1;{}m", level.color().to_fg_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_fixed_line() {
        let line = format_line(TimeFormat::Fixed, Level::Error, "code=42", new_year()).unwrap();
        assert_eq!(line, "[2023-01-01 00:00:00] ERROR: code=42\n");
    }

    #[test]
    fn test_tags() {
        for (level, tag) in [
            (Level::Warning, "WARNING:"),
            (Level::Info, "INFO:"),
            (Level::Debug, "DEBUG:"),
        ] {
            let line = format_line(TimeFormat::Fixed, level, "x", new_year()).unwrap();
            assert_eq!(line, format!("[2023-01-01 00:00:00] {tag} x\n"));
        }
    }

    #[test]
    fn test_local_formats_render() {
        let long = render_timestamp(TimeFormat::Long, new_year()).unwrap();
        let short = render_timestamp(TimeFormat::Short, new_year()).unwrap();
        assert!(!long.is_empty());
        assert!(!short.is_empty());
        assert_ne!(long, short);
        assert!(render_timestamp(TimeFormat::NotApplicable, new_year()).is_none());
        assert!(format_line(TimeFormat::NotApplicable, Level::Info, "x", new_year()).is_none());
    }

    #[test]
    fn test_color_prefixes() {
        assert_eq!(color_prefix(Level::Error), "\x1b[1;31m");
        assert_eq!(color_prefix(Level::Warning), "\x1b[1;35m");
        assert_eq!(color_prefix(Level::Info), "\x1b[1;36m");
        assert_eq!(color_prefix(Level::Debug), "\x1b[1;37m");
    }
}
