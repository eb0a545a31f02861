//! Convert a curl command to Python from the command line.
//!
//! The command is taken from the arguments, or read from stdin when none are
//! given, so `pbpaste | curlconv` works with multi-line commands.

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "curlconv", about = "Convert a curl command into Python requests code")]
struct Cli {
    /// Print the parsed request model as JSON instead of code.
    #[arg(long)]
    json: bool,

    /// The curl command, quoted as one argument so its own quoting survives.
    /// Read from stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = if cli.command.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read command from stdin")?;
        buf
    } else {
        cli.command.join(" ")
    };

    let model = curlconv_core::parse(&command);
    if model.url.is_empty() {
        tracing::warn!("no http(s) url found in command");
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&model).context("failed to serialize model")?;
        println!("{json}");
    } else {
        print!("{}", curlconv_core::generate(&model));
    }
    Ok(())
}
