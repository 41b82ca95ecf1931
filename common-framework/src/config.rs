use serde::Deserialize;
use thiserror::Error;

/// Default LRU capacity of a scanner's regex cache.
pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 64;
/// Default window, in bytes, examined by a regex match.
pub const DEFAULT_REGEX_MAX_LEN: usize = 1000;
/// Default bound for double-quoted and back-quoted strings.
pub const DEFAULT_QUOTED_MAX_LEN: usize = 3000;
/// Default bound for single-quoted strings (rune literals such as `'\0'`).
pub const DEFAULT_QUOTED_RUNE_MAX_LEN: usize = 10;
/// Default limit on nested grammar levels, such as JSON arrays in arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunable limits shared by every scanner.
///
/// All fields have defaults, so a TOML file only needs to name what it
/// overrides:
///
/// ```toml
/// regex_cache_capacity = 16
/// quoted_max_len = 512
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Number of compiled patterns kept per scanner.
    pub regex_cache_capacity: usize,
    /// Window used when a regex matcher is built without an explicit bound.
    pub regex_max_len: usize,
    /// Bound for `"` and `` ` `` quoted strings.
    pub quoted_max_len: usize,
    /// Bound for `'` quoted strings.
    pub quoted_rune_max_len: usize,
    /// Escape unit used by the default quoted-string matcher.
    pub escape: char,
    /// Nesting levels allowed before a parse is stopped.
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            regex_cache_capacity: DEFAULT_REGEX_CACHE_CAPACITY,
            regex_max_len: DEFAULT_REGEX_MAX_LEN,
            quoted_max_len: DEFAULT_QUOTED_MAX_LEN,
            quoted_rune_max_len: DEFAULT_QUOTED_RUNE_MAX_LEN,
            escape: '\\',
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Failure to load a [`ScanConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("regex_cache_capacity must be at least 1")]
    ZeroCacheCapacity,
}

impl ScanConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig = toml::from_str(text)?;
        if config.regex_cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_empty_toml_is_default() {
        let config = ScanConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_config_partial_override() {
        let config = ScanConfig::from_toml_str("quoted_max_len = 12\nescape = '^'").unwrap();
        assert_eq!(config.quoted_max_len, 12);
        assert_eq!(config.escape, '^');
        assert_eq!(config.regex_max_len, DEFAULT_REGEX_MAX_LEN);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_config_max_depth_override() {
        let config = ScanConfig::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        assert!(matches!(
            ScanConfig::from_toml_str("bogus = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        assert!(matches!(
            ScanConfig::from_toml_str("regex_cache_capacity = 0"),
            Err(ConfigError::ZeroCacheCapacity)
        ));
    }
}
