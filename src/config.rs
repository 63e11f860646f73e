//! Process configuration.
//!
//! Loaded once at startup, in order of precedence:
//! 1. Command-line flags
//! 2. Environment variables (`ACCOUNTABLE_*`, `RUST_LOG`), including a `.env`
//!    file loaded by the binary
//! 3. Defaults

use std::net::SocketAddr;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "accountable", author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "ACCOUNTABLE_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Release string reported by `/api/v0/version`.
    #[arg(long = "app-version", env = "ACCOUNTABLE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub app_version: String,

    /// Log filter directives, e.g. `info` or `accountable=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}
