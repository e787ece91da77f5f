#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    ShowHelp,
    ShowVersion,
    RunLoop { config: Option<PathBuf> },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CliError {
    #[error("Unknown argument: {}", arg)]
    UnknownArgument { arg: String },
    #[error("Missing value for {}", arg)]
    MissingValue { arg: String },
}

/// Parses the arguments after the program name. No arguments means "run the
/// command loop on stdin/stdout".
///
/// # Errors
/// Returns `CliError` on an unknown flag or a flag missing its value.
pub fn parse_cli_args(args: &[String]) -> Result<CliAction, CliError> {
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::ShowHelp),
            "-v" | "--version" => return Ok(CliAction::ShowVersion),
            "-c" | "--config" => {
                let value = iter.next().ok_or_else(|| CliError::MissingValue {
                    arg: arg.clone(),
                })?;
                config = Some(PathBuf::from(value));
            }
            other => {
                return Err(CliError::UnknownArgument {
                    arg: other.to_string(),
                })
            }
        }
    }
    Ok(CliAction::RunLoop { config })
}

#[must_use]
pub fn help_text() -> &'static str {
    "micmd - MI custom command dispatch over stdin/stdout\n\
     \n\
     Usage: micmd [OPTIONS]\n\
     \n\
     Reads one MI request per line from stdin and writes one result record\n\
     (and a '(gdb)' terminator) per request to stdout.\n\
     \n\
     Options:\n\
     \x20 -c, --config <PATH>  Config file (default: .micmd/config.toml)\n\
     \x20 -h, --help           Print help\n\
     \x20 -v, --version        Print version"
}
