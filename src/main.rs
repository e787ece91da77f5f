mod cli;
mod config;

use micmd::{register_builtins, runtime, CommandRegistry, DebugSession, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    // Protocol records own stdout; everything else goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match cli::parse_cli_args(&args) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", cli::help_text());
            std::process::exit(2);
        }
    };

    match action {
        cli::CliAction::ShowHelp => println!("{}", cli::help_text()),
        cli::CliAction::ShowVersion => println!("micmd {}", env!("CARGO_PKG_VERSION")),
        cli::CliAction::RunLoop { config } => {
            if let Err(err) = run(config).await {
                error!("{err}");
                std::process::exit(err.exit_code());
            }
        }
    }
}

async fn run(config_path: Option<std::path::PathBuf>) -> Result<()> {
    let config = config::load_config(config_path)?;

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry)?;

    let mut session = match config.exec_file.as_deref() {
        Some(path) => DebugSession::with_exec_file(path),
        None => DebugSession::new(),
    };

    info!(commands = registry.len(), "command loop starting");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let options = runtime::LoopOptions {
        emit_terminator: config.emit_terminator,
    };
    runtime::run_command_loop(stdin, stdout, &registry, &mut session, options).await
}
