//! Vahan mobile number lookup
//!
//! Prints exactly one JSON object on stdout:
//! `{"success", "mobile_number", "error", "response_time_seconds"}`.
//! Logs go to stderr (`RUST_LOG` controls verbosity).

use clap::{Parser, error::ErrorKind};
use std::{path::PathBuf, process::ExitCode};
use vahan_lookup::{FlowConfig, LaunchOptions, LookupRequest, LookupResult, lookup_mobile};

const USAGE: &str = "Usage: vahan-mobile <REG_NO> <CHASSIS_LAST5>";

#[derive(Parser)]
#[command(name = "vahan-mobile")]
#[command(version)]
#[command(about = "Look up the mobile number registered for a vehicle on the Vahan portal", long_about = None)]
struct Cli {
    /// Vehicle registration number, e.g. MH12AB1234
    registration_number: String,

    /// Last five characters of the chassis number
    chassis_last5: String,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,
}

fn print_result(result: &LookupResult) {
    match serde_json::to_string(result) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize result: {}", e),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::debug!("Argument error: {}", e);
            print_result(&LookupResult::failed(USAGE, 0.0));
            return ExitCode::FAILURE;
        }
    };

    let mut launch = LaunchOptions::new().headless(!cli.headed);
    if let Some(path) = cli.chrome_path {
        launch = launch.chrome_path(path);
    }

    let request = LookupRequest::new(cli.registration_number.to_uppercase(), cli.chassis_last5);
    let result = lookup_mobile(&request, launch, &FlowConfig::default());
    print_result(&result);

    ExitCode::SUCCESS
}
