//! Logging setup on top of the `log` facade and `env_logger`.
//!
//! Log records go to stderr so the duplicate report on stdout stays clean.
//! The level comes from `RUST_LOG` when it is set, otherwise from the CLI:
//! `--quiet` shows errors only, the default is info, `-v` debug, `-vv` trace.

use env_logger::Builder;
use log::LevelFilter;
use std::{env, io::Write};

/// Initialise the global logger. Call once, before any logging.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose > 0 {
            writeln!(
                buf,
                "{style}{:<5}{style:#} [{}] {}",
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
