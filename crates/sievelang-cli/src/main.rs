mod cli;
mod commands;
mod util;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { expr, file } => {
            commands::check::run(commands::check::CheckArgs { expr, file });
        }
        Command::Run { filter, record } => {
            commands::run::run(commands::run::RunArgs { filter, record });
        }
        Command::Sieve { file, record } => {
            commands::sieve::run(commands::sieve::SieveArgs { file, record });
        }
    }
}
