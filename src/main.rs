//! usradm - manage OS user accounts via the system utilities.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usradm::config::Settings;
use usradm::error::AdminError;
use usradm::users::UserManager;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> ExitCode {
    // Parse command line arguments (simple std::env approach)
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    let settings = match load_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    let (command, username) = match parse_command(&args) {
        Some(pair) => pair,
        None => {
            print_help();
            return ExitCode::FAILURE;
        }
    };

    let manager = match UserManager::new(&settings) {
        Ok(m) => m,
        Err(e) => {
            error!(error = %e, "Failed to initialize user manager");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&manager, &command, &username) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch a single command against the manager.
fn run(manager: &UserManager, command: &str, username: &str) -> Result<ExitCode, AdminError> {
    match command {
        "create" => {
            manager.create_user(username)?;
            println!("User {} created.", username);
            Ok(ExitCode::SUCCESS)
        }
        "delete" => {
            manager.delete_user(username)?;
            println!("User {} deleted.", username);
            Ok(ExitCode::SUCCESS)
        }
        "exists" => {
            if manager.user_exists(username)? {
                println!("User {} exists.", username);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("User {} does not exist.", username);
                Ok(ExitCode::FAILURE)
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Extract `<command> <username>` from the argument list, skipping options.
fn parse_command(args: &[String]) -> Option<(String, String)> {
    let mut positional = Vec::new();
    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--config" || arg == "-c" {
            i += 2;
            continue;
        }
        if arg.starts_with("--config=") {
            i += 1;
            continue;
        }
        positional.push(arg.clone());
        i += 1;
    }

    match positional.as_slice() {
        [command, username] => Some((command.clone(), username.clone())),
        _ => None,
    }
}

/// Load settings from `--config <path>` when given, otherwise from the
/// `ENV` environment profile.
fn load_settings(args: &[String]) -> Result<Settings, AdminError> {
    for (i, arg) in args.iter().enumerate() {
        if (arg == "--config" || arg == "-c") && i + 1 < args.len() {
            return Settings::load(&args[i + 1]);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Settings::load(path);
        }
    }
    Ok(Settings::from_env())
}

/// Initialize logging based on settings.
fn init_logging(settings: &Settings) -> Result<(), AdminError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match &settings.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Manage OS user accounts via the system id/useradd/userdel utilities.

USAGE:
    {} [OPTIONS] <COMMAND> <USERNAME>

COMMANDS:
    create     Create a new user account
    delete     Delete an existing user account
    exists     Check whether a user account exists (exit 0 = exists)

OPTIONS:
    -c, --config <PATH>    Path to a TOML configuration file
                           [default: profile selected by the ENV variable]
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME
    );
}
