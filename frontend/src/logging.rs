use chrono::Local;
use env_logger::Target;
use log::LevelFilter;
use std::io::Write;

/// Logs to stderr as `[HH:MM:SS.mmm] [LEVEL] message`. `RUST_LOG` still
/// overrides `level` per module.
pub fn init(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                Local::now().format("%T%.3f"),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        })
        .target(Target::Stderr)
        .init();
}
