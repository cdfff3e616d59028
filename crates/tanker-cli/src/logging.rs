//! Log output on stderr.
//!
//! Level comes from `-v` (info, `-vv` debug, `-vvv` trace), else from the
//! config's `[logging] level`, else warnings only. `-q` silences everything
//! below errors.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub fn level_for(verbose: u8, quiet: bool, configured: Option<&str>) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => configured
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(level: LevelFilter, color: bool) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    let color_choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    // A logger may already be installed when running under a test harness.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, color_choice);
}
