//! `leaf-diff` — compute the ops array between two leaf-override snapshots.
//!
//! Usage:
//!   leaf-diff '<current-object-json>'
//!
//! The base snapshot is read from stdin. The current snapshot is the first
//! argument. The resulting ops array is printed to stdout.

use std::io::{self, Read, Write};

use pipedash_leaf_patch::cli::diff_json;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let current = match args.get(1) {
        Some(c) => c.clone(),
        None => {
            eprintln!("First argument must be the current snapshot as a JSON object.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match diff_json(buf.trim(), &current) {
        Ok(ops) => {
            io::stdout().write_all(ops.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
