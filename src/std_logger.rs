use std::io::{Error, ErrorKind};
use std::str::FromStr;

use chrono::Local;
use log::{max_level, LevelFilter, Metadata, Record};

pub struct StdLogger;

static LOGGER: StdLogger = StdLogger;

impl log::Log for StdLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record))
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    let time_str = Local::now().format("%Y-%m-%dT%H:%M:%S");
    format!("{0} {1:<8}: {2}", time_str, record.level(), record.args())
}

/// Unknown or missing levels fall back to `info`.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn init(level: LevelFilter) -> std::io::Result<()> {
    log::set_logger(&LOGGER).map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }

    #[test]
    fn line_layout() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("Forwarding to upstream."))
                .level(Level::Info)
                .target("gemini_proxy")
                .build(),
        );

        assert!(line.ends_with(" INFO    : Forwarding to upstream."), "{line}");
        assert!(!line.contains("gemini_proxy"));
    }

    #[test]
    fn second_init_is_reported_as_io_error() {
        let _ = init(LevelFilter::Info);
        let err = init(LevelFilter::Info).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(!err.to_string().is_empty());
    }
}
