//! Command-line argument parsing for the folio CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in and persist the session
    Login { email: String, password: String },
    /// Clear the persisted session
    Logout,
    /// Verify the stored session with the server
    Status,
    /// Show the portfolio owner's profile
    PersonalInfo,
    /// List projects
    Projects,
    /// List skills
    Skills,
    /// Delete a project
    DeleteProject { id: String },
    /// Delete a skill
    DeleteSkill { id: String },
    /// Unusable arguments; carries the reason
    Invalid(String),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--verbose` / `-v`: debug logging
    pub verbose: bool,
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: folio [--verbose] <command>

Commands:
  login <email> <password>   Sign in and save the session
  logout                     Clear the saved session
  status                     Check the saved session with the server
  personal-info              Show the profile
  projects                   List projects
  skills                     List skills
  project delete <id>        Delete a project
  skill delete <id>          Delete a skill

Options:
  -v, --verbose              Debug logging on stderr
  -V, --version              Print version
  -h, --help                 Print this help";

/// Parse command-line arguments.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use folio::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["folio".to_string(), "skills".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Skills);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut verbose = false;
    let mut positional = Vec::new();

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                return CliArgs {
                    command: CliCommand::Version,
                    verbose,
                }
            }
            "--help" | "-h" => {
                return CliArgs {
                    command: CliCommand::Help,
                    verbose,
                }
            }
            "--verbose" | "-v" => verbose = true,
            _ => positional.push(arg),
        }
    }

    CliArgs {
        command: parse_command(&positional),
        verbose,
    }
}

fn parse_command(words: &[String]) -> CliCommand {
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] => CliCommand::Help,
        ["login", email, password] => CliCommand::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["login", ..] => CliCommand::Invalid("login needs <email> <password>".to_string()),
        ["logout"] => CliCommand::Logout,
        ["status"] => CliCommand::Status,
        ["personal-info"] => CliCommand::PersonalInfo,
        ["projects"] => CliCommand::Projects,
        ["skills"] => CliCommand::Skills,
        ["project", "delete", id] => CliCommand::DeleteProject { id: id.to_string() },
        ["skill", "delete", id] => CliCommand::DeleteSkill { id: id.to_string() },
        ["project", ..] | ["skill", ..] => {
            CliCommand::Invalid(format!("expected `{} delete <id>`", words[0]))
        }
        [other, ..] => CliCommand::Invalid(format!("unknown command `{}`", other)),
    }
}
