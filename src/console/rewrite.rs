//! Dotted call syntax
//!
//! `ClassName.method(args)` is rewritten into the canonical space-separated
//! command before dispatch:
//!
//! ```text
//! User.all()                                -> all User
//! User.show("1234")                         -> show User 1234
//! User.update("1234", "first_name", "Bob")  -> update User 1234 first_name "Bob"
//! User.update("1234", {"age": 30})          -> bulk update
//! ```
//!
//! Lines that are not a dotted call are left for default handling.

use std::sync::OnceLock;

use regex::Regex;

/// Result of rewriting a dotted call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Canonical command line
    Command(String),
    /// `Class.update("id", {...})`: `body` is the raw brace argument
    BulkUpdate {
        class_name: String,
        id: String,
        body: String,
    },
}

fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\w*)\.(\w+)\(([^)]*)\)$").expect("call pattern is valid")
    })
}

fn quoted_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^"([^"]*)"(?:\s*,\s*(.*))?$"#).expect("quoted id pattern is valid")
    })
}

/// Rewrites a dotted call, or returns `None` if `line` is not one.
pub fn rewrite(line: &str) -> Option<Rewrite> {
    let caps = call_pattern().captures(line.trim())?;
    let class_name = &caps[1];
    let method = &caps[2];
    let (id, rest) = split_arguments(&caps[3]);

    if method == "update" {
        if let Some(rest) = rest {
            if rest.starts_with('{') {
                return Some(Rewrite::BulkUpdate {
                    class_name: class_name.to_string(),
                    id,
                    body: rest.to_string(),
                });
            }
            let (attribute, value) = match rest.split_once(',') {
                Some((attribute, value)) => (attribute, Some(value)),
                None => (rest, None),
            };
            let attribute = strip_quotes(attribute.trim());
            let value = value.map(|v| double_quoted(v.trim()));
            return Some(Rewrite::Command(join(&[
                method,
                class_name,
                id.as_str(),
                attribute.as_str(),
                value.as_deref().unwrap_or(""),
            ])));
        }
    }

    Some(Rewrite::Command(join(&[method, class_name, id.as_str()])))
}

/// Splits call arguments into the id and whatever follows the first comma.
fn split_arguments(args: &str) -> (String, Option<&str>) {
    let args = args.trim();
    let (id, rest) = match quoted_id_pattern().captures(args) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        ),
        None => match args.split_once(',') {
            Some((id, rest)) => (id.trim(), Some(rest)),
            None => (args, None),
        },
    };
    let rest = rest.map(str::trim).filter(|r| !r.is_empty());
    (id.to_string(), rest)
}

fn strip_quotes(s: &str) -> String {
    s.trim_matches(|c| c == '"' || c == '\'').to_string()
}

/// Single-quoted values become double-quoted so they are kept as text.
fn double_quoted(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        format!("\"{}\"", &s[1..s.len() - 1])
    } else {
        s.to_string()
    }
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> String {
        match rewrite(line) {
            Some(Rewrite::Command(cmd)) => cmd,
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_argument_calls() {
        assert_eq!(command("User.all()"), "all User");
        assert_eq!(command("State.count()"), "count State");
        assert_eq!(command(".all()"), "all");
    }

    #[test]
    fn test_quoted_and_bare_ids() {
        assert_eq!(command(r#"User.show("1234-abcd")"#), "show User 1234-abcd");
        assert_eq!(command("User.destroy(1234)"), "destroy User 1234");
    }

    #[test]
    fn test_update_attribute_value() {
        assert_eq!(
            command(r#"User.update("38f2", "first_name", "John")"#),
            r#"update User 38f2 first_name "John""#
        );
        assert_eq!(
            command(r#"Place.update("p1", "max_guest", 4)"#),
            "update Place p1 max_guest 4"
        );
        assert_eq!(
            command(r#"Place.update("p1", 'name', 'Loft')"#),
            r#"update Place p1 name "Loft""#
        );
        assert_eq!(
            command(r#"User.update("38f2", "first_name")"#),
            "update User 38f2 first_name"
        );
    }

    #[test]
    fn test_update_with_dictionary() {
        assert_eq!(
            rewrite(r#"User.update("38f2", {'first_name': "John", "age": 89})"#),
            Some(Rewrite::BulkUpdate {
                class_name: "User".into(),
                id: "38f2".into(),
                body: r#"{'first_name': "John", "age": 89}"#.into(),
            })
        );
    }

    #[test]
    fn test_non_matching_lines() {
        assert_eq!(rewrite("show User 1234"), None);
        assert_eq!(rewrite("User.show"), None);
        assert_eq!(rewrite("User.show(\"1\") trailing"), None);
        assert_eq!(rewrite("frobnicate"), None);
    }
}
