use log::{LevelFilter, Metadata, Record};
use std::env;
use std::io::Write;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "TETROSHIP_LOG";

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut out = std::io::stderr().lock();
            let _ = writeln!(out, "[{}] {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize logging with a level taken from the `TETROSHIP_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid. Calling it twice is harmless.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
