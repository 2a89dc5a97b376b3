use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// `level` is parsed as a [`LevelFilter`]; unknown values fall back to INFO.
/// Logs go to stderr so that a revealed message on stdout stays clean.
/// Format: `[HH:MM:SS] [LEVEL] message`
pub fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(filter)
        .init();
}
