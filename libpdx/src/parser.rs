//! Phase 3: Recursive Descent Parser
//!
//! The block parser and the block/list disambiguator operate
//! cooperatively over one forward-only [`Cursor`], recursing as the
//! input descends into nested braces. Recovery is silent: a missing
//! closing brace, an unterminated quote, or an empty key ends the
//! enclosing scope with whatever was accumulated, and nothing here can
//! fail.

use crate::lexer::{Cursor, TokenKind};
use crate::value::{Block, Comparison, Operator, Value};

// ============================================================================
// Block Parsing
// ============================================================================

/// Parse a key-delimited body: the whole input, or the interior of a
/// brace pair. Consumes the closing `}` when one is present; end of
/// input is accepted in its place.
pub fn parse_block(cur: &mut Cursor<'_>) -> Block {
    let mut result = Block::new();

    loop {
        cur.skip_whitespace();

        let Some(ch) = cur.peek() else { break };

        if ch == '}' {
            cur.advance();
            break;
        }

        if ch == '{' {
            // Stray anonymous block with no key: parse and discard.
            cur.advance();
            parse_block_or_list(cur);
            continue;
        }

        let key = cur.read_token();
        if key.is_empty() {
            break;
        }
        let key = key.text;

        cur.skip_whitespace();

        match cur.peek() {
            Some('=') => {
                cur.advance();
                cur.skip_whitespace();
                if cur.peek() == Some('=') {
                    // Double equals is an equality comparison, not an
                    // assignment.
                    cur.advance();
                    cur.skip_whitespace();
                    let value = parse_value(cur);
                    insert(&mut result, key, compare(Operator::Equals, value));
                } else {
                    let value = parse_value(cur);
                    insert(&mut result, key, value);
                }
            }
            Some('!' | '?' | '<' | '>') => {
                let op = cur.read_token();
                let resolved = if op.kind == TokenKind::Operator {
                    Operator::from_token(&op.text)
                } else {
                    None
                };
                match resolved {
                    Some(op) => {
                        cur.skip_whitespace();
                        let value = parse_value(cur);
                        // Overwrites an earlier value for the same key:
                        // only the assignment paths promote duplicates.
                        result.insert(key, compare(op, value));
                    }
                    None => {
                        // A bare `!` or `?` tokenizes to nothing. Keep
                        // the key as a flag; the unconsumed character
                        // ends the body through the empty-key rule.
                        result.insert(key, Value::Bool(true));
                    }
                }
            }
            Some('{') => {
                cur.advance();
                let value = parse_block_or_list(cur);
                insert(&mut result, key, value);
            }
            _ => {
                // Bare flag key.
                result.insert(key, Value::Bool(true));
            }
        }
    }

    result
}

/// Insert a value under a key, promoting a repeated key to an ordered
/// list of every value seen for it.
fn insert(block: &mut Block, key: String, value: Value) {
    match block.get_mut(&key) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::Bool(false));
            *existing = Value::List(vec![first, value]);
        }
        None => {
            block.insert(key, value);
        }
    }
}

fn compare(op: Operator, value: Value) -> Value {
    Value::Comparison(Comparison {
        op,
        value: Box::new(value),
    })
}

// ============================================================================
// Value Parsing
// ============================================================================

/// Parse a value: a nested block or list when a `{` follows, otherwise
/// one coerced scalar token.
pub fn parse_value(cur: &mut Cursor<'_>) -> Value {
    cur.skip_whitespace();

    if cur.peek() == Some('{') {
        cur.advance();
        return parse_block_or_list(cur);
    }

    let token = cur.read_token();
    Value::from_token(&token.text)
}

// ============================================================================
// Block/List Disambiguation
// ============================================================================

/// Classification state for a brace body whose shape is not yet known.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Shape {
    Undetermined,
    List,
    Map,
}

/// A collected entry: a bare value, or a key paired with a value.
enum Entry {
    Bare(Value),
    Pair(String, Value),
}

/// Parse the interior of a brace pair whose shape (mapping or
/// sequence) is determined by its contents.
///
/// Bare values classify the body as a list, `key = value` pairs as a
/// map. Entries arriving after the classification settled the other
/// way are kept rather than rejected: a late pair is appended as a
/// pair, and a late bare token becomes the degenerate pair
/// `(token, yes)`. A body that never produced an entry resolves as an
/// empty map.
pub fn parse_block_or_list(cur: &mut Cursor<'_>) -> Value {
    let mut entries: Vec<Entry> = Vec::new();
    let mut shape = Shape::Undetermined;

    loop {
        cur.skip_whitespace();

        let Some(ch) = cur.peek() else { break };

        if ch == '}' {
            cur.advance();
            break;
        }

        if ch == '{' {
            // Nested anonymous block; its own shape is again decided by
            // its contents.
            cur.advance();
            entries.push(Entry::Bare(parse_block_or_list(cur)));
            if shape == Shape::Undetermined {
                shape = Shape::List;
            }
            continue;
        }

        let token = cur.read_token();
        if token.is_empty() {
            break;
        }

        cur.skip_whitespace();

        match cur.peek() {
            Some('=') => {
                shape = Shape::Map;
                cur.advance();
                cur.skip_whitespace();
                if cur.peek() == Some('=') {
                    cur.advance();
                    cur.skip_whitespace();
                    let value = parse_value(cur);
                    entries.push(Entry::Pair(token.text, compare(Operator::Equals, value)));
                } else {
                    let value = parse_value(cur);
                    entries.push(Entry::Pair(token.text, value));
                }
            }
            Some('<' | '>') => {
                shape = Shape::Map;
                let op = cur.read_token();
                cur.skip_whitespace();
                let value = parse_value(cur);
                let value = if op.kind == TokenKind::Operator {
                    match Operator::from_token(&op.text) {
                        Some(op) => compare(op, value),
                        None => value,
                    }
                } else {
                    value
                };
                entries.push(Entry::Pair(token.text, value));
            }
            _ => {
                if shape == Shape::Map {
                    // Bare token after key=value pairs: keep it as a
                    // degenerate flag pair.
                    entries.push(Entry::Pair(token.text, Value::Bool(true)));
                } else {
                    shape = Shape::List;
                    entries.push(Entry::Bare(Value::from_token(&token.text)));
                }
            }
        }
    }

    if shape == Shape::Map {
        let mut result = Block::new();
        for entry in entries {
            if let Entry::Pair(key, value) = entry {
                insert(&mut result, key, value);
            }
        }
        Value::Block(result)
    } else if entries.is_empty() {
        // Empty bodies and bodies that never settled resolve as maps.
        Value::Block(Block::new())
    } else {
        Value::List(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Entry::Bare(value) => Some(value),
                    Entry::Pair(..) => None,
                })
                .collect(),
        )
    }
}
