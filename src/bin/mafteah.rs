//! Mafteah CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use mafteah::cli::args::MafteahArgs;
use mafteah::cli::commands::execute_command;

fn main() {
    let args = MafteahArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .parse_default_env()
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: MafteahArgs) -> anyhow::Result<()> {
    let command = command_name(&args);
    execute_command(args).map_err(|e| anyhow::Error::new(e).context(format!("{command} failed")))
}

fn command_name(args: &MafteahArgs) -> &'static str {
    use mafteah::cli::args::Command;
    match args.command {
        Command::Normalize(_) => "normalize",
        Command::Root(_) => "root",
        Command::Expand(_) => "expand",
        Command::Gematria(_) => "gematria",
        Command::Search(_) => "search",
        Command::Suggest(_) => "suggest",
        Command::Stats(_) => "stats",
        Command::Rules(_) => "rules",
    }
}
