//! Runs the host and log formatter self-tests.

use std::{env, process};

use rtclog::config::Config;
use rtclog::log::{log_config::LogConfig, log_context::LogContext};
use rtclog::{log_error, log_fatal, log_info, selftest};

fn main() {
    // --- Parse CLI args ----------------------------------------------------
    //
    // Supported:
    //   cargo run --bin rtclog_selftest
    //      -> default logging settings
    //
    //   cargo run --bin rtclog_selftest -- rtclog.conf
    //      -> settings from the [Logging] section of rtclog.conf

    let args: Vec<String> = env::args().collect();

    let config = match args.len() {
        1 => Config::empty(),
        2 => match Config::load(&args[1]) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[rtclog_selftest] {e}");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage:");
            eprintln!("  {}           # default settings", args[0]);
            eprintln!("  {} [CONFIG]  # e.g. rtclog.conf", args[0]);
            process::exit(1);
        }
    };

    let ctx = match LogConfig::from_config(&config).and_then(LogContext::new) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("[rtclog_selftest] invalid logging configuration: {e}");
            process::exit(1);
        }
    };

    // --- Run probes ---------------------------------------------------------
    let rc = match selftest::run_all(&ctx) {
        Ok(()) => {
            log_info!(ctx, "selftest", "all self-tests passed");
            0
        }
        Err(e) => {
            log_error!(ctx, "selftest", "  Error: {e}");
            log_fatal!(ctx, "selftest", "self-test failed");
            1
        }
    };

    ctx.shutdown();
    process::exit(rc);
}
