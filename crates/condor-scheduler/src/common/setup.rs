use env_logger::DEFAULT_FILTER_ENV;
use env_logger::fmt::style::Style;
use log::{Level, LevelFilter};
use std::fmt::Arguments;
use std::io::Write;

/// Writes a log record as `<level> <message>`.
/// The tool finishes in a moment, so timestamps are only shown when debugging.
fn write_short_record<W: Write>(
    writer: &mut W,
    level_style: Style,
    level: Level,
    args: &Arguments,
) -> std::io::Result<()> {
    writeln!(writer, "{level_style}{level:<5}{level_style:#} {args}")
}

/// Sets the behavior of the logger, based on passed environment variables
/// such as `RUST_LOG`.
pub fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::default();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let has_debug = std::env::var(DEFAULT_FILTER_ENV)
        .map(|v| v.contains("debug"))
        .unwrap_or(false);

    if verbose || has_debug {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            write_short_record(buf, level_style, record.level(), record.args())
        });
    }

    // Overwrite the defaults from env
    builder.parse_default_env();
    builder.init();
}
