//! stderr logging for the `retype` binary.

use log::LevelFilter;

/// Maps the number of `-v` flags to a level. Warnings are always shown.
pub(crate) fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn stderr(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}: [{}] {}",
                record.level().to_string().to_lowercase(),
                record.target(),
                message
            ));
        })
        .chain(std::io::stderr())
}

pub(crate) fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    stderr(level).apply()
}
