//! Command-line front end for the rotor-cipher brute forcer.
//!
//! Hand-rolled argument loop (no parser dependency); the search engine does
//! all the real work.

use std::path::PathBuf;
use std::process::ExitCode;

use rotorcrack::{crack, Catalog};

struct Args {
    message: String,
    results: usize,
    catalog: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            return ExitCode::from(2);
        }
    };

    let loaded;
    let catalog = match &args.catalog {
        Some(path) => match Catalog::from_json_file(path) {
            Ok(catalog) => {
                loaded = catalog;
                &loaded
            }
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Catalog::historical(),
    };

    match crack(
        &args.message,
        args.results,
        &catalog.rotors,
        &catalog.reflectors,
    ) {
        Ok(results) => {
            for r in &results {
                println!("{:.6} {}\n{}", r.score, r.message, r.config);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut message = None;
    let mut results = 3usize;
    let mut catalog = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--message" => {
                message = Some(args.next().ok_or("--message requires a value")?);
            }
            "--results" => {
                let value = args.next().ok_or("--results requires a value")?;
                results = value
                    .parse()
                    .map_err(|_| format!("--results must be a positive integer, got '{value}'"))?;
                if results == 0 {
                    return Err("--results must be at least 1".to_string());
                }
            }
            "--rotors" => {
                catalog = Some(PathBuf::from(
                    args.next().ok_or("--rotors requires a value")?,
                ));
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(Args {
        message: message.ok_or("--message is required")?,
        results,
        catalog,
    })
}

fn print_usage() {
    eprintln!("usage: rotorcrack --message MESSAGE [--results N] [--rotors CATALOG.json]");
    eprintln!();
    eprintln!("  --message   ciphertext to crack, uppercase A-Z only");
    eprintln!("  --results   number of best candidates to print (default 3)");
    eprintln!("  --rotors    JSON rotor catalog to search instead of the built-in set");
}
