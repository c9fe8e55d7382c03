//! Version command for the folio CLI.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("folio {}", VERSION);
    std::process::exit(0)
}
