//! Variable-reference parsing for `${name}` placeholders
//!
//! Extraction is best-effort syntax scanning, not validation: malformed or
//! unterminated markers are skipped silently, and names are not checked
//! against any registry.

/// Extract the distinct variable names referenced in `text`.
///
/// Names are returned in first-appearance order. `$` without a following
/// `{`, an empty `${}`, and an unterminated `${...` are all ignored.
pub fn extract_refs(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            let start = i + 2;
            match text[start..].find('}') {
                Some(rel_end) => {
                    let name = &text[start..start + rel_end];
                    // A '$' inside the braces means the opener we matched was
                    // not the innermost one; resume scanning from it.
                    if let Some(rel_dollar) = name.find('$') {
                        i = start + rel_dollar;
                        continue;
                    }
                    if !name.is_empty() && !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                    i = start + rel_end + 1;
                }
                // Unterminated marker, nothing more to extract
                None => break,
            }
        } else {
            i += 1;
        }
    }

    names
}

/// Substitute `${name}` placeholders in `text` using `lookup`.
///
/// References `lookup` cannot resolve are left verbatim, so partially
/// resolvable templates degrade instead of erroring.
pub fn substitute<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            let start = i + 2;
            if let Some(rel_end) = text[start..].find('}') {
                let name = &text[start..start + rel_end];
                if !name.contains('$') {
                    match lookup(name) {
                        Some(value) => out.push_str(&value),
                        None => out.push_str(&text[i..start + rel_end + 1]),
                    }
                    i = start + rel_end + 1;
                    continue;
                }
            }
        }
        let ch = text[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}
