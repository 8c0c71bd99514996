// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A grab bag of helper functions

const MAX_COMMENT_LINE_LENGTH: usize = 80;

/// Keywords and reserved words, see https://doc.rust-lang.org/reference/keywords.html
const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be used as raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

/// Converts snake_case to PascalCase.
pub fn snake_to_pascal(s: &str) -> String {
    let mut value = String::new();
    let mut seen_underscore = true;
    for c in s.chars() {
        if c == '_' {
            seen_underscore = true;
            continue;
        }
        if seen_underscore {
            value.extend(c.to_uppercase());
            seen_underscore = false;
            continue;
        }
        value.push(c);
    }
    value
}

/// Converts camelCase (or PascalCase) to snake_case.
///
/// Runs of capitals are treated as a single word, so `documentID` becomes
/// `document_id` and `IPAddress` becomes `ip_address`. Characters that are
/// not valid in identifiers are treated as word separators.
pub fn camel_to_snake(s: &str) -> String {
    let chars = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();
    let chars = chars.trim_matches('_').chars().collect::<Vec<_>>();
    let mut value = String::with_capacity(chars.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !value.ends_with('_') {
                value.push('_');
            }
        }
        if *c == '_' && value.ends_with('_') {
            continue;
        }
        value.push(c.to_ascii_lowercase());
    }
    value
}

/// Converts a property name (usually camelCase) to PascalCase.
pub fn to_pascal(s: &str) -> String {
    snake_to_pascal(&camel_to_snake(s))
}

/// Converts a method id suffix, such as `projects.locations.dataStores.get`,
/// to a constant name: `PROJECTS_LOCATIONS_DATA_STORES_GET`.
pub fn to_screaming_snake(s: &str) -> String {
    s.split('.')
        .map(camel_to_snake)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_uppercase()
}

/// Determine if the string is a keyword.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns a valid Rust identifier for a JSON property name.
///
/// Keywords are escaped as raw identifiers (`type` becomes `r#type`), except
/// for the keywords that cannot be raw identifiers, which get a trailing
/// underscore (`self` becomes `self_`).
pub fn rust_field_name(wire_name: &str) -> String {
    let mut name = camel_to_snake(wire_name);
    if name.is_empty() {
        name = "field".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name = format!("f_{name}");
    }
    escape_keyword(name)
}

fn escape_keyword(name: String) -> String {
    if NOT_RAW.contains(&name.as_str()) {
        return format!("{name}_");
    }
    if is_keyword(&name) {
        return format!("r#{name}");
    }
    name
}

/// Returns the name serde uses on the wire for a field, when the containing
/// struct has `#[serde(rename_all = "camelCase")]`.
///
/// serde ignores the `r#` prefix, then capitalizes every character after an
/// underscore, drops the underscores, and lowercases the first character.
pub fn serde_camel_case(field: &str) -> String {
    let field = field.strip_prefix("r#").unwrap_or(field);
    let mut pascal = String::new();
    let mut capitalize = true;
    for c in field.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(c.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(c);
        }
    }
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// The identifier without any `r#` prefix.
pub fn unraw(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// Turns a Discovery description into a rustdoc comment.
///
/// Each line of the output starts with `prefix` followed by `///`. Lines are
/// wrapped at word boundaries, and words (including URLs) are never split.
/// Paragraph breaks in the description are preserved.
pub fn as_comment(prefix: &str, comment: &str) -> String {
    let comment = comment.replace("\r\n", "\n").replace('\r', "\n");
    let comment = comment.trim_end();
    if comment.is_empty() {
        return String::new();
    }
    let max = MAX_COMMENT_LINE_LENGTH.saturating_sub(prefix.len() + 4);
    let mut buf = String::new();
    for line in comment.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            buf.push_str(prefix);
            buf.push_str("///\n");
            continue;
        }
        // Keep the indentation, it may be a list continuation or a code block.
        let indent = &line[..line.len() - line.trim_start().len()];
        let mut current = String::from(indent);
        for word in line.split_whitespace() {
            if current.trim().is_empty() {
                current.push_str(word);
                continue;
            }
            if current.chars().count() + 1 + word.chars().count() > max {
                push_line(&mut buf, prefix, &current);
                current = format!("{indent}{word}");
                continue;
            }
            current.push(' ');
            current.push_str(word);
        }
        push_line(&mut buf, prefix, &current);
    }
    buf
}

fn push_line(buf: &mut String, prefix: &str, line: &str) {
    buf.push_str(prefix);
    buf.push_str("/// ");
    buf.push_str(line);
    buf.push('\n');
}
