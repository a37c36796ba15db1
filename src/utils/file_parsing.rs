#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Wraps a token in single quotes when it would otherwise break an ARFF line.
pub fn quote_if_needed(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '}' | '%' | '\'' | '"'));
    if needs_quotes {
        format!("'{}'", s.replace('\'', "\\'"))
    } else {
        s.to_string()
    }
}

pub fn split_csv_preserving_quotes(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if ch == ',' {
                    out.push(cur.trim().to_string());
                    cur.clear();
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    if !cur.trim().is_empty() || !out.is_empty() {
        out.push(cur.trim().to_string());
    }
    out
}
