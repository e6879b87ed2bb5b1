use clap::Parser;
use sctl::cli::commands;
use sctl::cli::{Cli, Commands};
use sctl::errors::SctlError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Diagnostics go to stderr so `read`, `send` and `run` keep stdout clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref name,
            ref value,
            ref key,
            no_decode,
            skip_key_check,
        } => commands::add::execute(
            &cli,
            name,
            value.as_deref(),
            key.as_deref(),
            no_decode,
            skip_key_check,
        ),
        Commands::Read { ref name, ref key } => {
            commands::read::execute(&cli, name, key.as_deref())
        }
        Commands::List => commands::list::execute(&cli),
        Commands::Rm { ref name, force } => commands::rm::execute(&cli, name, force),
        Commands::Run {
            ref key,
            ref command,
        } => commands::run::execute(&cli, key.as_deref(), command),
        Commands::Rekey {
            ref new_key,
            ref key,
        } => commands::rekey::execute(&cli, new_key, key.as_deref()),
        Commands::Send { ref value, ref key } => {
            commands::send::execute(value.as_deref(), key.as_deref())
        }
        Commands::Receive { ref blob, ref key } => {
            commands::receive::execute(blob, key.as_deref())
        }
        Commands::Keygen { ref path } => commands::keygen::execute(path),
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        sctl::cli::output::error(&e.to_string());
        let code = match e {
            SctlError::ChildProcessFailed(code) => code,
            _ => 1,
        };
        std::process::exit(code);
    }
}
