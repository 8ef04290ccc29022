//! Parse a script file (or a directory of them) and print the JSON
//! form of the resulting tree.

use libpdx::{encode, parse_all_in_directory, parse_file, Format};
use std::path::Path;
use std::process;

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: extract <FILE|DIR>");
        process::exit(2);
    };

    let result = if Path::new(&path).is_dir() {
        parse_all_in_directory(&path, "*.txt")
    } else {
        parse_file(&path)
    };

    match result {
        Ok(value) => println!("{}", encode(&value, Format::Json)),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
