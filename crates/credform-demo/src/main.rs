#![forbid(unsafe_code)]

//! Interactive login form walkthrough.
//!
//! Reads commands line by line, drives the form controller directly, and
//! reprints the three-state glyph row after every event, so the submitting
//! phase is visible between the authenticate command and its resolution.

mod cli;

use std::io::{self, BufRead, Write};
use std::process;

use credform_core::{
    Account, AuthError, Authentication, Command, Credentials, FormController, FormState,
};
use credform_validation::{ValidationBuilder, ValidationComposite};
use tracing::level_filters::LevelFilter;

const REPL_HELP: &str = "\
COMMANDS:
    <field> <value>   Set a field (e.g. 'email ada@example.com')
    <field>           Clear a field
    submit            Validate and authenticate
    state             Reprint the form state
    trace             Show the submission trace
    reset             Tear down and start a fresh form
    help              Show this message
    quit              Exit";

// ---------------------------------------------------------------------------
// Fixture Authenticator
// ---------------------------------------------------------------------------

/// Forced submission outcome selected with `--fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailMode {
    None,
    Invalid,
    Unavailable,
    Unexpected,
}

impl FailMode {
    fn from_flag(flag: &str) -> Self {
        match flag {
            "invalid" => Self::Invalid,
            "unavailable" => Self::Unavailable,
            "unexpected" => Self::Unexpected,
            _ => Self::None,
        }
    }
}

/// A one-user directory: accepts exactly the fixture credential pair.
struct FixtureDirectory {
    email: String,
    password: String,
    fail: FailMode,
}

impl Authentication for FixtureDirectory {
    fn authenticate(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        match self.fail {
            FailMode::Invalid => return Err(AuthError::InvalidCredentials),
            FailMode::Unavailable => {
                return Err(AuthError::Unavailable {
                    detail: "forced by --fail=unavailable".into(),
                });
            }
            FailMode::Unexpected => return Err(AuthError::Unexpected),
            FailMode::None => {}
        }

        let email_ok = credentials.value_of("email") == Some(self.email.as_str());
        let password_ok = credentials.value_of("password") == Some(self.password.as_str());
        if email_ok && password_ok {
            Ok(Account::new("demo-access-token"))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(state: &FormState) {
    for status in state.statuses() {
        println!(
            "  {} {:<10} {}",
            status.indication().glyph(),
            status.field().as_str(),
            status.tooltip().unwrap_or("")
        );
    }
    let loading = if state.is_loading() { "yes" } else { "no" };
    let gate = if state.is_submit_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    println!("  loading: {loading}   submit: {gate}");
    if let Some(err) = state.main_error() {
        println!("  error: {err}");
    }
}

fn render_trace(controller: &FormController) {
    if controller.trace().is_empty() {
        println!("  (no submissions yet)");
        return;
    }
    for event in controller.trace().events() {
        println!("  {event:?}");
    }
    println!("  checksum: {:016x}", controller.trace().checksum());
}

// ---------------------------------------------------------------------------
// Entry Point
// ---------------------------------------------------------------------------

fn login_rules(min_password: usize) -> ValidationComposite {
    ValidationBuilder::new()
        .field("email")
        .required()
        .email()
        .field("password")
        .required()
        .min_length(min_password)
        .build()
}

fn init_logging(level: &str) {
    if level == "off" {
        return;
    }
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging(&opts.log);

    let directory = FixtureDirectory {
        email: opts.email.clone(),
        password: opts.password.clone(),
        fail: FailMode::from_flag(&opts.fail),
    };
    let mut controller = FormController::new(login_rules(opts.min_password));

    println!("credform demo — type 'help' for commands");
    render(controller.state());

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    loop {
        print!("> ");
        if out.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Input error: {e}");
                process::exit(1);
            }
        }

        match line.trim() {
            "" | "state" => render(controller.state()),
            "help" => println!("{REPL_HELP}"),
            "quit" | "exit" | "q" => break,
            "trace" => render_trace(&controller),
            "reset" => {
                controller.teardown();
                controller = FormController::new(login_rules(opts.min_password));
                println!("Form reset.");
                render(controller.state());
            }
            "submit" => match controller.on_submit() {
                Command::None => {
                    println!("Submit ignored.");
                    render(controller.state());
                }
                Command::Authenticate { token, credentials } => {
                    render(controller.state());
                    println!("  authenticating {token}...");
                    let outcome = directory.authenticate(&credentials);
                    let _ = controller.resolve_auth(token, outcome);
                    render(controller.state());
                    if let Some(account) = controller.account() {
                        println!("  signed in, access token: {}", account.access_token());
                    }
                }
            },
            other => {
                let (field, value) = match other.split_once(' ') {
                    Some((field, value)) => (field, value),
                    None => (other, ""),
                };
                if controller.state().status_of(field).is_some() {
                    controller.on_field_change(field, value);
                    render(controller.state());
                } else {
                    println!("Unknown command or field: {field} (try 'help')");
                }
            }
        }
    }

    controller.teardown();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use credform_validation::FieldName;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(vec![
            (FieldName::new("email"), email.to_string()),
            (FieldName::new("password"), password.to_string()),
        ])
    }

    fn directory(fail: FailMode) -> FixtureDirectory {
        FixtureDirectory {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
            fail,
        }
    }

    // -- FixtureDirectory tests --

    #[test]
    fn accepts_the_fixture_pair() {
        let dir = directory(FailMode::None);
        let account = dir
            .authenticate(&creds("ada@example.com", "hunter22"))
            .expect("fixture pair accepted");
        assert_eq!(account.access_token(), "demo-access-token");
    }

    #[test]
    fn rejects_everything_else() {
        let dir = directory(FailMode::None);
        assert_eq!(
            dir.authenticate(&creds("ada@example.com", "wrong")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            dir.authenticate(&creds("bob@example.com", "hunter22")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn forced_failures_override_the_pair() {
        let pair = creds("ada@example.com", "hunter22");
        assert_eq!(
            directory(FailMode::Invalid).authenticate(&pair),
            Err(AuthError::InvalidCredentials)
        );
        assert!(matches!(
            directory(FailMode::Unavailable).authenticate(&pair),
            Err(AuthError::Unavailable { .. })
        ));
        assert_eq!(
            directory(FailMode::Unexpected).authenticate(&pair),
            Err(AuthError::Unexpected)
        );
    }

    #[test]
    fn fail_mode_parses_known_flags() {
        assert_eq!(FailMode::from_flag("none"), FailMode::None);
        assert_eq!(FailMode::from_flag("invalid"), FailMode::Invalid);
        assert_eq!(FailMode::from_flag("unavailable"), FailMode::Unavailable);
        assert_eq!(FailMode::from_flag("unexpected"), FailMode::Unexpected);
    }
}
