//! `runway-parse` — parse a pasted runway report into normalized JSON.
//!
//! Usage:
//!   runway-parse < report.txt
//!
//! The text is read from stdin; the JSON report is printed to stdout.
//! Parsing never fails — an unusable paste produces a report whose
//! `errors` array explains the accepted shapes.

use std::io::{self, Read, Write};

use pipedash_runway::cli::parse_to_json;

fn main() {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match parse_to_json(&buf) {
        Ok(report) => {
            io::stdout().write_all(report.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
