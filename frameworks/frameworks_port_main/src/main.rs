//! bert_port Binary Entry Point
//!
//! Parses flags, sets up stderr logging and serves requests over the
//! process's stdin and stdout.

use std::io;
use std::process;

use clap::Parser;
use frameworks_port_main::{run, PortArgs};

fn init_logging(args: &PortArgs) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if let Some(ref filters) = args.log_level {
        builder.parse_filters(filters);
    }
    if let Err(e) = builder.try_init() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}

fn main() {
    let args = PortArgs::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_logging(&args);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match run(&args, stdin, stdout) {
        Ok(()) => {
            log::debug!("input closed, exiting");
            process::exit(0);
        }
        Err(e) => {
            log::error!("port failed: {}", e);
            process::exit(1);
        }
    }
}
