//! Logging setup for the command line tool

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Level for the `--verbose` / `--quiet` flags; quiet wins
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    match (verbose, quiet) {
        (_, true) => LevelFilter::Error,
        (true, false) => LevelFilter::Debug,
        (false, false) => LevelFilter::Warn,
    }
}

/// Install the stderr logger; later calls only adjust the level
pub fn init(level: LevelFilter) {
    let _ = SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init();
    log::set_max_level(level);
}
