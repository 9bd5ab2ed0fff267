//! Renders a single message through the configured sinks.
//!
//! Usage:
//!   minispdlog info "service started"
//!   minispdlog --pattern "[%H:%M:%S] [%L] %v" warn "disk almost full"
//!   minispdlog --stderr --utc --name net error "connection reset"

use clap::Parser;
use minispdlog::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::run(&args)
}
