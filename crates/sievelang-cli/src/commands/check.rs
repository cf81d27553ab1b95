use std::path::PathBuf;

use sievelang_core::compile_filter;
use sievelang_core::diagnostics::render;

use crate::util::read_source;

pub struct CheckArgs {
    pub expr: Option<String>,
    pub file: Option<PathBuf>,
}

pub fn run(args: CheckArgs) {
    let (source, origin) = match (args.expr, args.file) {
        (_, Some(path)) => {
            let source = read_source(&path).unwrap_or_else(|e| {
                eprintln!("error: could not read {}: {}", path.display(), e);
                std::process::exit(1);
            });
            let origin = path.display().to_string();
            (source, origin)
        }
        (Some(expr), None) if expr == "-" => {
            let source = read_source(&PathBuf::from("-")).unwrap_or_else(|e| {
                eprintln!("error: could not read stdin: {}", e);
                std::process::exit(1);
            });
            (source, "<stdin>".to_string())
        }
        (Some(expr), None) => (expr, "<expr>".to_string()),
        (None, None) => {
            eprintln!("error: provide a filter expression or --file");
            std::process::exit(1);
        }
    };

    if let Err(err) = compile_filter(&source) {
        eprint!("{}", render(&source, &origin, &err));
        std::process::exit(1);
    }

    // Silent on success (like cargo check).
}
