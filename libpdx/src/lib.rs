//! Parser for Clausewitz-style game script.
//!
//! Paradox titles keep their game data in a nested, brace-delimited
//! scripting syntax. The same braces delimit both mappings and
//! sequences, so a block's shape is not known until its contents have
//! been read; keys repeat to build up sequences; and `key >= value`
//! comparisons appear wherever plain assignments do. This crate parses
//! that syntax, without a schema, into a tree of [`Value`]s.
//!
//! # Parsing Pipeline
//!
//! 1. **Comment stripping**: `#` comments are removed line by line,
//!    quote-aware.
//!
//! 2. **Tokenizer**: tokens are read on demand from a forward-only
//!    cursor; one character of lookahead resolves the grammar locally,
//!    with no backtracking.
//!
//! 3. **Recursive descent**: the block parser and the block/list
//!    disambiguator build the value tree, merging duplicate keys into
//!    ordered lists.
//!
//! The parser is permissive by design: truncated input, unterminated
//! quotes, and unconvertible numbers degrade to partial trees and
//! strings rather than errors. Only the filesystem boundary can fail.

mod encode;
mod error;
mod lexer;
mod parser;
mod scanner;
mod value;

pub use encode::{encode, Format};
pub use error::{Error, Result};
pub use value::{Block, Comparison, Operator, Value};

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse script text into its value tree.
///
/// The result is always a [`Value::Block`]; empty or whitespace-only
/// input yields an empty one. Parsing never fails.
///
/// # Example
///
/// ```
/// use libpdx::parse;
///
/// let tree = parse("stability = 3");
/// assert_eq!(tree.as_block().unwrap()["stability"].as_integer(), Some(3));
/// ```
pub fn parse(input: &str) -> Value {
    Value::Block(parse_document(input))
}

fn parse_document(input: &str) -> Block {
    let stripped = scanner::strip_comments(input);
    let mut cursor = lexer::Cursor::new(&stripped);
    parser::parse_block(&mut cursor)
}

/// Parse a single script file.
///
/// The file is read as UTF-8 with a leading byte-order mark stripped.
/// Read and decode failures propagate; parsing itself cannot fail.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    let text = read_source(path.as_ref())?;
    Ok(parse(&text))
}

fn read_source(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // Paradox ships most of its files with a UTF-8 BOM.
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Parse every file matching `pattern` under `dir` and merge their
/// top-level blocks into one.
///
/// Files merge in lexical filename order; when two files define the
/// same top-level key, the later file's value replaces the earlier
/// one. Duplicate-key promotion applies only within a single document,
/// never across files. A file that cannot be read is logged and
/// skipped, and the rest of the batch still contributes. The only
/// error is a malformed pattern.
pub fn parse_all_in_directory(dir: impl AsRef<Path>, pattern: &str) -> Result<Value> {
    let full = dir.as_ref().join(pattern).to_string_lossy().into_owned();
    let paths = glob::glob(&full).map_err(|source| Error::Pattern {
        pattern: full.clone(),
        source,
    })?;

    let mut combined = Block::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!("skipping unreadable path: {}", err);
                continue;
            }
        };
        match read_source(&path) {
            Ok(text) => {
                debug!("parsing {}", path.display());
                for (key, value) in parse_document(&text) {
                    combined.insert(key, value);
                }
            }
            Err(err) => {
                warn!("{}", err);
            }
        }
    }
    Ok(Value::Block(combined))
}
