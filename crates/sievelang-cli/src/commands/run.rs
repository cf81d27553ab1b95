use std::path::PathBuf;

use sievelang_core::diagnostics::render;
use sievelang_core::{compile_filter, matches};

use crate::util::read_source;

pub struct RunArgs {
    pub filter: String,
    pub record: PathBuf,
}

pub fn run(args: RunArgs) {
    let ast = compile_filter(&args.filter).unwrap_or_else(|err| {
        eprint!("{}", render(&args.filter, "<filter>", &err));
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

    match matches(&ast, &record) {
        Ok(result) => println!("{}", result),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
