//! Surefoot CLI: probe a live WebDriver session
//!
//! ## Usage
//!
//! ```bash
//! surefoot frame content --url https://example.test   # find a nested frame
//! surefoot wait-load                                 # wait for readyState
//! surefoot alert --accept --timeout 5                # print and accept an alert
//! surefoot --session 8a1f.. windows                  # list window handles
//! ```

use clap::Parser;
use std::process::ExitCode;
use surefoot::{SurefootConfig, W3cDriver};
use surefoot_cli::{handlers, Cli, CliError, CliResult, Commands, Outcome};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "surefoot=debug,surefoot_cli=debug",
        _ => "surefoot=trace,surefoot_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> CliResult<SurefootConfig> {
    match &cli.config {
        Some(path) => SurefootConfig::from_file(path).map_err(|source| CliError::Config {
            path: path.display().to_string(),
            source,
        }),
        None => Ok(SurefootConfig::default()),
    }
}

fn run(cli: &Cli) -> CliResult<Outcome> {
    let config = load_config(cli)?;
    if !cli.webdriver.starts_with("http://") && !cli.webdriver.starts_with("https://") {
        return Err(CliError::invalid_argument(format!(
            "--webdriver must be an http(s) URL, got {}",
            cli.webdriver
        )));
    }

    let (driver, owned) = match &cli.session {
        Some(id) => (W3cDriver::attach(&cli.webdriver, id.clone())?, false),
        None => {
            let caps = serde_json::json!({ "browserName": cli.browser });
            (W3cDriver::connect(&cli.webdriver, caps)?, true)
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Frame(args) => handlers::frame(&driver, &config, args, &mut stdout),
        Commands::WaitLoad(args) => handlers::wait_load(&driver, &config, args, &mut stdout),
        Commands::Alert(args) => handlers::alert(&driver, args, &mut stdout),
        Commands::Windows => handlers::windows(&driver, &mut stdout),
    };

    if owned {
        if let Err(e) = driver.quit() {
            tracing::warn!(error = %e, "failed to end session");
        }
    }
    result
}
