//! Argument parsing for console commands

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Number, Value};

/// Tokens of an `update` line. Later tokens are only present if the earlier
/// ones are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs<'a> {
    pub class_name: &'a str,
    pub id: Option<&'a str>,
    pub attribute: Option<&'a str>,
    /// Raw value token; a quoted value keeps its quotes and may hold spaces
    pub value: Option<&'a str>,
}

fn update_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^(\S+)(?:\s+(\S+)(?:\s+(\S+)(?:\s+("[^"]*"|\S+))?)?)?"#)
            .expect("update pattern is valid")
    })
}

/// Splits `<class> <id> <attribute> <value>`. Returns `None` for a blank line.
pub fn parse_update(args: &str) -> Option<UpdateArgs<'_>> {
    let caps = update_pattern().captures(args.trim())?;
    let group = |i| caps.get(i).map(|m| m.as_str());
    Some(UpdateArgs {
        class_name: group(1)?,
        id: group(2),
        attribute: group(3),
        value: group(4),
    })
}

/// `true` if `raw` is wrapped in double quotes.
pub fn is_quoted(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"')
}

/// Text of a value token: quotes are removed from a quoted token, anything
/// else is returned unchanged.
pub fn unquote(raw: &str) -> String {
    if is_quoted(raw) {
        raw.replace('"', "")
    } else {
        raw.to_string()
    }
}

/// Generic value rule for attributes without a declared coercion.
///
/// Quoted -> text. Contains `.` -> float. Otherwise integer; an integer
/// beyond `u64` is kept as the nearest float. Anything that fails to parse
/// stays text.
pub fn literal_value(raw: &str) -> Value {
    if is_quoted(raw) {
        return Value::String(unquote(raw));
    }
    let parsed = if raw.contains('.') {
        float_value(raw)
    } else {
        raw.parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<u64>().map(Value::from))
            .ok()
            .or_else(|| big_integer(raw))
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

fn float_value(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Signed run of digits too wide for the integer types.
fn big_integer(raw: &str) -> Option<Value> {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    float_value(raw)
}
