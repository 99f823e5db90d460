//! hbnb CLI entry point
//!
//! Parses nothing and opens nothing itself: all logic is delegated to
//! `cli::run`. Errors are printed to stderr with their code and the process
//! exits non-zero.

use hbnb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
