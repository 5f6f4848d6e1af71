//! Tarn command-line runner.

use tarnc::commands::{parse_run_options, run_file, run_source};

fn main() {
    tarnc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let (options, positional) = match parse_run_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let result = match args[1].as_str() {
        "run" => {
            let Some(path) = positional.first() else {
                eprintln!("Usage: tarn run <file> [--strict] [--max-steps=N] [--set name=value]...");
                std::process::exit(2);
            };
            run_file(path, &options)
        }
        "eval" => {
            let Some(source) = positional.first() else {
                eprintln!("Usage: tarn eval '<script>' [--strict] [--max-steps=N] [--set name=value]...");
                std::process::exit(2);
            };
            run_source(source, &options)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        other => {
            eprintln!("unknown command '{other}'");
            print_usage();
            std::process::exit(2);
        }
    };

    match result {
        Ok(value) => println!("{value}"),
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tarn script runner");
    println!();
    println!("Usage: tarn <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>        Execute a script file and print its value");
    println!("  eval '<script>'   Execute script text and print its value");
    println!("  help              Show this message");
    println!();
    println!("Options:");
    println!("  --strict            Undefined variables and null receivers are errors");
    println!("  --max-steps=<n>     Abort after evaluating n expressions");
    println!("  --set <name=value>  Bind a variable before running (repeatable)");
    println!();
    println!("Logging: set RUST_LOG (e.g. RUST_LOG=tarn_eval=debug); TARN_LOG_TREE=1 for a span tree.");
}
