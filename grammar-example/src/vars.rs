//! Variable declarations: `~<digits>=<value>` and `$<name>(=<value>)?`.

use crate::toolbar::ToolbarData;
use crate::ESCAPE;
use common_framework::{ScanConfig, Source};
use scanner_framework::combinators::{
    and, digits, eof, escape_any, identifier, loop1, or, quoted_string, rune, rune_none,
};
use scanner_framework::{Matcher, ScanError, Scanner};
use value_framework::combinators::{
    map_value, opt_value, or_value, pair_value, preceded, string_value, terminated, try_map_value,
};
use std::collections::BTreeMap;
use value_framework::{run_value_match, ValueFn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarDecl {
    /// `~3=value`
    Tilde { index: u32, value: String },
    /// `$name` or `$name=value`
    Dollar { name: String, value: Option<String> },
}

/// A value is one or more quoted strings, escape pairs or non-space units,
/// kept as written.
fn value_matcher() -> Matcher {
    loop1(or(vec![
        quoted_string(),
        escape_any(ESCAPE),
        rune_none(vec![' ', '\t', '\r', '\n']),
    ]))
}

fn decl_value() -> ValueFn<VarDecl> {
    let index = try_map_value(string_value(digits()), |text| text.parse::<u32>());
    let tilde = preceded(
        rune('~'),
        pair_value(index, rune('='), string_value(value_matcher())),
    );
    let dollar = preceded(
        rune('$'),
        pair_value(
            string_value(identifier()),
            and(vec![]),
            opt_value(preceded(rune('='), string_value(value_matcher()))),
        ),
    );
    let decl = or_value(vec![
        map_value(tilde, |(index, value)| VarDecl::Tilde { index, value }),
        map_value(dollar, |(name, value)| VarDecl::Dollar { name, value }),
    ]);
    terminated(decl, eof())
}

pub fn parse_var_decl(text: &str) -> Result<VarDecl, ScanError> {
    parse_var_decl_with_config(text, ScanConfig::default())
}

pub fn parse_var_decl_with_config(text: &str, config: ScanConfig) -> Result<VarDecl, ScanError> {
    let sc = Scanner::with_config(Source::from_text(text), config);
    match run_value_match(&sc, sc.src_min(), &decl_value()) {
        (Some(decl), _, _) => Ok(decl),
        (None, _, outcome) => Err(outcome
            .into_error()
            .unwrap_or_else(|| ScanError::no_match(sc.src_min()))),
    }
}

/// Variables declared by a toolbar, keyed by `~N` or `$name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarMap {
    vars: BTreeMap<String, Option<String>>,
}

impl VarMap {
    /// Collects the declarations found as the first argument of each part.
    /// Parts whose first argument is not a declaration are skipped.
    pub fn from_toolbar(data: &ToolbarData) -> Self {
        let mut map = VarMap::default();
        for arg in data.parts.iter().filter_map(|part| part.args.first()) {
            match parse_var_decl(&arg.text) {
                Ok(decl) => map.insert(decl),
                Err(err) => tracing::trace!(arg = %arg.text, %err, "not a variable declaration"),
            }
        }
        map
    }

    /// Later declarations replace earlier ones.
    pub fn insert(&mut self, decl: VarDecl) {
        let (key, value) = match decl {
            VarDecl::Tilde { index, value } => (format!("~{index}"), Some(value)),
            VarDecl::Dollar { name, value } => (format!("${name}"), value),
        };
        self.vars.insert(key, value);
    }

    /// `Some(None)` for a variable declared without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.vars.get(key).map(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
