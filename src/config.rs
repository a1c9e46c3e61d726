//! Converter configuration.
//!
//! Two bounds gate how much of a contract gets emitted. Loadable from an
//! optional TOML file, merged over defaults, the same way lint
//! configuration is layered in comparable tools: a user file only needs
//! to override the fields it cares about.

use crate::error::ConvertError;
use serde::Deserialize;

/// Default cap on emitted storage declarations.
pub const MAX_STORAGE_VARIABLES_DEFAULT: usize = 64;
/// Default cap on emitted functions.
pub const MAX_FUNCTIONS_DEFAULT: usize = 32;

/// Bounds applied by the contract visitor. Entries beyond either bound are
/// silently dropped (spec invariant: emitted count is `min(inputs, bound)`).
#[derive(Debug, Clone, Copy)]
pub struct ConverterConfig {
    pub max_storage_variables: usize,
    pub max_functions: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            max_storage_variables: MAX_STORAGE_VARIABLES_DEFAULT,
            max_functions: MAX_FUNCTIONS_DEFAULT,
        }
    }
}

/// On-disk representation: every field optional, merged over `ConverterConfig::default()`.
#[derive(Debug, Deserialize, Default)]
struct ConverterConfigToml {
    max_storage_variables: Option<usize>,
    max_functions: Option<usize>,
}

impl ConverterConfig {
    /// Load configuration from a TOML string, falling back to defaults for
    /// any field the file omits.
    pub fn from_toml(contents: &str) -> Result<Self, ConvertError> {
        let parsed: ConverterConfigToml = toml::from_str(contents)
            .map_err(|e| ConvertError::MalformedInput(format!("invalid config toml: {e}")))?;
        let defaults = ConverterConfig::default();
        Ok(ConverterConfig {
            max_storage_variables: parsed
                .max_storage_variables
                .unwrap_or(defaults.max_storage_variables),
            max_functions: parsed.max_functions.unwrap_or(defaults.max_functions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let cfg = ConverterConfig::default();
        assert_eq!(cfg.max_storage_variables, MAX_STORAGE_VARIABLES_DEFAULT);
        assert_eq!(cfg.max_functions, MAX_FUNCTIONS_DEFAULT);
    }

    #[test]
    fn partial_toml_merges_with_defaults() {
        let cfg = ConverterConfig::from_toml("max_functions = 8\n").unwrap();
        assert_eq!(cfg.max_storage_variables, MAX_STORAGE_VARIABLES_DEFAULT);
        assert_eq!(cfg.max_functions, 8);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg = ConverterConfig::from_toml("").unwrap();
        assert_eq!(cfg.max_storage_variables, MAX_STORAGE_VARIABLES_DEFAULT);
        assert_eq!(cfg.max_functions, MAX_FUNCTIONS_DEFAULT);
    }

    #[test]
    fn bad_toml_is_malformed_input() {
        let err = ConverterConfig::from_toml("not valid = [ toml").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput(_)));
    }
}
