use std::path::PathBuf;

use sievelang_core::diagnostics::render;
use sievelang_core::{compile_sieve, Evaluator};

use crate::util::read_source;

pub struct SieveArgs {
    pub file: PathBuf,
    pub record: PathBuf,
}

pub fn run(args: SieveArgs) {
    let sieve_text = read_source(&args.file).unwrap_or_else(|e| {
        eprintln!("error: could not read {}: {}", args.file.display(), e);
        std::process::exit(1);
    });
    let sieve = compile_sieve(&sieve_text).unwrap_or_else(|err| {
        eprint!("{}", render(&sieve_text, &args.file.display().to_string(), &err));
        std::process::exit(1);
    });

    let record_text = read_source(&args.record).unwrap_or_else(|e| {
        eprintln!("error: could not read {}: {}", args.record.display(), e);
        std::process::exit(1);
    });
    let record: serde_json::Value = serde_json::from_str(&record_text).unwrap_or_else(|e| {
        eprintln!("error: record is not valid JSON: {}", e);
        std::process::exit(1);
    });

    let mut evaluator = Evaluator::new();
    match sieve.match_trace(&mut evaluator, &record) {
        Ok((result, Some(index))) => println!("{} {}", result, index),
        Ok((result, None)) => println!("{} none", result),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
