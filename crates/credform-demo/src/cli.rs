#![forbid(unsafe_code)]

//! Command-line argument parsing for the credform demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `CREDFORM_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
credform demo — interactive login form walkthrough

USAGE:
    credform-demo [OPTIONS]

OPTIONS:
    --email=ADDR         Fixture account email (default: ada@example.com)
    --password=PASS      Fixture account password (default: hunter22)
    --min-password=N     Minimum password length rule (default: 5)
    --fail=MODE          Force every submission outcome: 'none' (default),
                         'invalid', 'unavailable', or 'unexpected'
    --log=LEVEL          Log level: 'off' (default), 'error', 'warn',
                         'info', 'debug', or 'trace'
    --help, -h           Show this help message
    --version, -V        Show version

COMMANDS (at the prompt):
    <field> <value>      Set a field (e.g. 'email ada@example.com')
    <field>              Clear a field
    submit               Validate and authenticate
    state                Reprint the form state
    trace                Show the submission trace
    reset                Tear down and start a fresh form
    help                 Show the command list
    quit                 Exit

ENVIRONMENT VARIABLES:
    CREDFORM_DEMO_EMAIL          Override --email
    CREDFORM_DEMO_PASSWORD       Override --password
    CREDFORM_DEMO_MIN_PASSWORD   Override --min-password
    CREDFORM_DEMO_FAIL           Override --fail
    CREDFORM_DEMO_LOG            Override --log";

/// Parsed command-line options.
pub struct Opts {
    /// Fixture account email accepted by the demo directory.
    pub email: String,
    /// Fixture account password accepted by the demo directory.
    pub password: String,
    /// Minimum password length enforced by the rules.
    pub min_password: usize,
    /// Forced submission outcome: "none", "invalid", "unavailable",
    /// or "unexpected".
    pub fail: String,
    /// Log level: "off" or a tracing level name.
    pub log: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
            min_password: 5,
            fail: "none".into(),
            log: "off".into(),
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Ok(val) = env::var("CREDFORM_DEMO_EMAIL") {
            opts.email = val;
        }
        if let Ok(val) = env::var("CREDFORM_DEMO_PASSWORD") {
            opts.password = val;
        }
        if let Ok(val) = env::var("CREDFORM_DEMO_MIN_PASSWORD")
            && let Ok(n) = val.parse()
        {
            opts.min_password = n;
        }
        if let Ok(val) = env::var("CREDFORM_DEMO_FAIL") {
            opts.fail = val;
        }
        if let Ok(val) = env::var("CREDFORM_DEMO_LOG") {
            opts.log = val;
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = env::args().skip(1).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("credform-demo {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--email=") {
                        opts.email = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--password=") {
                        opts.password = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--min-password=") {
                        match val.parse() {
                            Ok(n) => opts.min_password = n,
                            Err(_) => {
                                eprintln!("Invalid --min-password value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--fail=") {
                        opts.fail = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = val.to_string();
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
            i += 1;
        }

        // Validate choice flags (covers env values too)
        match opts.fail.as_str() {
            "none" | "invalid" | "unavailable" | "unexpected" => {}
            _ => {
                eprintln!("Invalid --fail value: {}", opts.fail);
                process::exit(1);
            }
        }
        match opts.log.as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                eprintln!("Invalid --log value: {}", opts.log);
                process::exit(1);
            }
        }

        opts
    }
}
