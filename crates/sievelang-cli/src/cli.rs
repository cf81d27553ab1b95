use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sievelang", bin_name = "sievelang")]
#[command(about = "Compile and evaluate sievelang filters and sieves")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a single filter expression and report success or a rendered error
    #[command(after_help = r#"EXAMPLES:
  sievelang check 'name == "John Doe"'
  sievelang check -f filter.sv"#)]
    Check {
        /// Filter source, or '-' to read from stdin
        expr: Option<String>,

        /// Read the filter source from a file instead of the positional argument
        #[arg(long, short = 'f', value_name = "PATH", conflicts_with = "expr")]
        file: Option<PathBuf>,
    },

    /// Compile a filter and evaluate it against a JSON record
    #[command(after_help = r#"EXAMPLES:
  sievelang run --filter 'age == 97' --record record.json
  echo '{"age": 97}' | sievelang run --filter 'age == 97' --record -"#)]
    Run {
        /// Filter source text
        #[arg(long)]
        filter: String,

        /// Path to a JSON record file, or '-' to read from stdin
        #[arg(long, value_name = "PATH")]
        record: PathBuf,
    },

    /// Compile a sieve and evaluate it against a JSON record
    #[command(after_help = r#"EXAMPLES:
  sievelang sieve --file rules.sieve --record record.json"#)]
    Sieve {
        /// Path to the sieve source file
        #[arg(long, value_name = "PATH")]
        file: PathBuf,

        /// Path to a JSON record file, or '-' to read from stdin
        #[arg(long, value_name = "PATH")]
        record: PathBuf,
    },
}
