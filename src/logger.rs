use std::io::Write;

use log::LevelFilter;

/// Initialize the logger with the specified level
///
/// `RUST_LOG` still refines the filter per module. Records from dependencies
/// are capped at `warn` so `trace` output stays about the tracer.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level.min(LevelFilter::Warn))
        .filter_module("fogpath", level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
