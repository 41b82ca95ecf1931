//! JSON 解析示例
//!
//! A JSON reader built in one pass with the value bridge. Once an array or
//! object is opened, a missing closing bracket is fatal instead of sending
//! the parse back to try other alternatives. Arrays and objects nested deeper
//! than [`ScanConfig::max_depth`] are rejected before they can exhaust the
//! stack.

use common_framework::{ScanConfig, Source};
use scanner_framework::combinators::{
    and, must, optional, regexp, rune, sequence, spaces, string_section,
};
use scanner_framework::{Matcher, ScanError, Scanner, SectionOpts};
use std::fmt;
use value_framework::bridge::parse_finite;
use value_framework::combinators::{
    const_value, delimited, loop_sep_value, map_value, nested_value, opt_value, or_value,
    pair_value, preceded, recursive_value, string_value, terminated, try_map_value,
};
use value_framework::unquote::unquote;
use value_framework::{run_value_match, ValueFn};

const NUMBER: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    /// Members in source order; duplicate keys are kept.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// The last member named `key` of an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(members) => members.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Compact JSON.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(b) => write!(f, "{b}"),
            JsonValue::Number(n) => write!(f, "{n}"),
            JsonValue::String(s) => write_json_string(f, s),
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            JsonValue::Object(members) => {
                f.write_str("{")?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn ws() -> Matcher {
    optional(spaces(true))
}

fn token<T: 'static>(v: ValueFn<T>) -> ValueFn<T> {
    delimited(ws(), v, ws())
}

fn closing(ch: char) -> Matcher {
    must(and(vec![ws(), rune(ch)]), format!("expected `{ch}`"))
}

fn json_string() -> ValueFn<String> {
    let opts = SectionOpts::new().escape('\\').fail_on_newline(true);
    try_map_value(string_value(string_section("\"", opts)), |text| unquote(&text, '\\'))
}

/// The grammar for one JSON value with surrounding whitespace.
pub fn json_grammar() -> ValueFn<JsonValue> {
    recursive_value(|value| {
        let number = try_map_value(string_value(regexp(NUMBER)), |text| {
            parse_finite(&text).map(JsonValue::Number)
        });
        let literal = or_value(vec![
            const_value(sequence("null"), JsonValue::Null),
            const_value(sequence("true"), JsonValue::Bool(true)),
            const_value(sequence("false"), JsonValue::Bool(false)),
        ]);

        let items = map_value(
            opt_value(loop_sep_value(value.clone(), rune(','), false)),
            Option::unwrap_or_default,
        );
        let array = nested_value(map_value(
            preceded(rune('['), terminated(items, closing(']'))),
            JsonValue::Array,
        ));

        let member = pair_value(token(json_string()), rune(':'), value);
        let members = map_value(
            opt_value(loop_sep_value(member, rune(','), false)),
            Option::unwrap_or_default,
        );
        let object = nested_value(map_value(
            preceded(rune('{'), terminated(members, closing('}'))),
            JsonValue::Object,
        ));

        token(or_value(vec![
            object,
            array,
            map_value(json_string(), JsonValue::String),
            number,
            literal,
        ]))
    })
}

pub fn parse_json(text: &str) -> Result<JsonValue, ScanError> {
    parse_json_with_config(text, ScanConfig::default())
}

pub fn parse_json_with_config(text: &str, config: ScanConfig) -> Result<JsonValue, ScanError> {
    let sc = Scanner::with_config(Source::from_text(text), config);
    let (value, end, outcome) = run_value_match(&sc, sc.src_min(), &json_grammar());
    match value {
        Some(value) if end == sc.src_max() => Ok(value),
        Some(_) => Err(ScanError::fatal(end, "trailing characters after JSON value")),
        None => {
            let err = outcome
                .into_error()
                .unwrap_or_else(|| ScanError::no_match(sc.src_min()));
            tracing::debug!(%err, "invalid JSON");
            Err(err)
        }
    }
}
