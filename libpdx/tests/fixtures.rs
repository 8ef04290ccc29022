//! Test harness that parses checked-in script fixtures and compares
//! their JSON encoding against expected output files.
//!
//! Every `tests/fixtures/NAME.txt` has a sibling `NAME.json` holding
//! the expected `Format::Json` encoding of the parsed tree. Fixtures
//! are small excerpts in the shape of real game files: definition
//! tables, country setups, events.

use std::fs;
use std::path::{Path, PathBuf};

use libpdx::{encode, parse, Format};

/// All checked-in `.txt` fixtures, in filename order.
fn fixture_files() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let mut paths: Vec<PathBuf> = fs::read_dir(root)
        .expect("fixture directory")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "txt").unwrap_or(false))
        .collect();
    paths.sort();
    paths
}

#[test]
fn fixtures_match_expected_json() {
    let paths = fixture_files();
    assert!(!paths.is_empty(), "no fixtures found");

    for path in paths {
        let source = fs::read_to_string(&path).unwrap();
        let expected = fs::read_to_string(path.with_extension("json")).unwrap();
        let actual = encode(&parse(&source), Format::Json);
        assert_eq!(
            actual.trim(),
            expected.trim(),
            "fixture {} diverged",
            path.display()
        );
    }
}

#[test]
fn fixtures_reparse_from_script_form() {
    for path in fixture_files() {
        let source = fs::read_to_string(&path).unwrap();
        let tree = parse(&source);
        let reparsed = parse(&encode(&tree, Format::Script));
        assert_eq!(
            tree,
            reparsed,
            "fixture {} did not round-trip",
            path.display()
        );
    }
}
