//! Field tokenizer for one dataset line.
//!
//! A field is either a double-quoted span or a run of characters other than
//! `,` and `"`, and it only counts when it is followed by optional whitespace
//! and then a comma or the end of the line. Positions where no field can start
//! are skipped one character at a time, so empty fields produce no token and
//! stray text before a quote is dropped.

/// Splits `line` into its field tokens, with surrounding quotes removed.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while let Some(c) = line[pos..].chars().next() {
        match field_at(line, pos) {
            Some((end, field)) => {
                fields.push(field.to_string());
                pos = end;
            }
            None => pos += c.len_utf8(),
        }
    }

    fields
}

/// Tries to match one field starting at byte offset `start`; returns the end
/// offset and the unquoted field text.
fn field_at(line: &str, start: usize) -> Option<(usize, &str)> {
    let rest = &line[start..];

    if let Some(body) = rest.strip_prefix('"') {
        // Shortest quoted span whose closing quote is followed by a terminator.
        for (i, c) in body.char_indices() {
            if is_line_terminator(c) {
                return None;
            }
            if c == '"' {
                let end = start + 1 + i + 1;
                if terminates_field(&line[end..]) {
                    return Some((end, &body[..i]));
                }
            }
        }
        return None;
    }

    let len = rest.find([',', '"']).unwrap_or(rest.len());
    if len == 0 {
        return None;
    }
    let end = start + len;
    terminates_field(&line[end..]).then(|| (end, &rest[..len]))
}

fn terminates_field(tail: &str) -> bool {
    let tail = tail.trim_start();
    tail.is_empty() || tail.starts_with(',')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
