//! Phase 1: Comment Stripping
//!
//! Strips `#` comments from source text before tokenizing. Comments are
//! recognized per line: a `"` toggles an in-quote flag, and the first
//! `#` seen outside quotes truncates the rest of the line. The quote
//! flag resets at every newline, so an unterminated quote on one line
//! never suppresses stripping on the lines below it. The tokenizer's
//! own quote handling runs through newlines; the mismatch is harmless
//! because quoted strings are not expected to span lines.

/// Remove `#` comments from source text, line by line.
pub fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());

    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }

        let mut in_quote = false;
        let mut end = line.len();
        for (pos, ch) in line.char_indices() {
            match ch {
                '"' => in_quote = !in_quote,
                '#' if !in_quote => {
                    end = pos;
                    break;
                }
                _ => {}
            }
        }

        result.push_str(&line[..end]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_comment() {
        assert_eq!(strip_comments("a = 1 # one"), "a = 1 ");
        assert_eq!(strip_comments("# whole line\nb = 2"), "\nb = 2");
    }

    #[test]
    fn test_hash_inside_quotes_kept() {
        assert_eq!(
            strip_comments("key = \"a#b\" # comment"),
            "key = \"a#b\" "
        );
    }

    #[test]
    fn test_quote_state_resets_per_line() {
        // The unterminated quote on the first line must not keep the
        // second line's comment alive.
        assert_eq!(
            strip_comments("name = \"unterminated\nb = 2 # gone"),
            "name = \"unterminated\nb = 2 "
        );
    }

    #[test]
    fn test_lines_without_comments_unchanged() {
        let source = "a = 1\nb = { 2 3 }\n";
        assert_eq!(strip_comments(source), source);
    }
}
