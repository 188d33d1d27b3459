//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Surefoot: probe a live WebDriver session for frames, page loads and alerts
#[derive(Parser, Debug)]
#[command(name = "surefoot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// WebDriver remote end URL
    #[arg(long, env = "SUREFOOT_WEBDRIVER", default_value = "http://localhost:9515", global = true)]
    pub webdriver: String,

    /// Attach to an existing session instead of starting one
    #[arg(long, env = "SUREFOOT_SESSION", global = true)]
    pub session: Option<String>,

    /// Browser for new sessions
    #[arg(long, default_value = "chrome", global = true)]
    pub browser: String,

    /// Timing configuration (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find a frame by name anywhere in the frame tree
    Frame(FrameArgs),

    /// Wait until document.readyState is complete
    WaitLoad(WaitLoadArgs),

    /// Wait for an alert and print its text
    Alert(AlertArgs),

    /// List window handles
    Windows,
}

/// Arguments for the frame command
#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Value of the frame's name attribute
    pub name: String,

    /// Navigate here first
    #[arg(long)]
    pub url: Option<String>,

    /// Also search iframes
    #[arg(long)]
    pub iframes: bool,
}

/// Arguments for the wait-load command
#[derive(Args, Debug)]
pub struct WaitLoadArgs {
    /// Navigate here first
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for the alert command
#[derive(Args, Debug)]
pub struct AlertArgs {
    /// Accept the alert once it appears
    #[arg(long)]
    pub accept: bool,

    /// Seconds to wait for the alert
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}
