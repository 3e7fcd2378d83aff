//! Parameter resolution configuration.

use std::path::PathBuf;

use ntt_core::Env;
use serde::{Deserialize, Serialize};

/// Variables naming the default parameters file, highest precedence first.
pub const PARAMETERS_FILE_VARS: [&str; 2] = ["NTT_PARAMETERS_FILE", "K3_PARAMETERS_FILE"];

/// Variables naming the parameters directory, highest precedence first.
pub const PARAMETERS_DIR_VARS: [&str; 2] = ["NTT_PARAMETERS_DIR", "K3_PARAMETERS_DIR"];

/// Where module parameters come from.
///
/// Relative paths are resolved against the suite root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Default parameters file
    pub parameters_file: Option<PathBuf>,

    /// Directory holding `{module}/{test}.parameters` overrides; the suite
    /// root if unset
    pub parameters_dir: Option<PathBuf>,

    /// Module assumed for unqualified test names when the default file
    /// declares none
    pub fallback_module: Option<String>,
}

impl ParamsConfig {
    /// Read the configuration from environment variables.
    ///
    /// `NTT_*` variables take precedence over `K3_*`. Blank values count as
    /// unset.
    pub fn from_env(env: &impl Env) -> Self {
        Self {
            parameters_file: first_set(env, &PARAMETERS_FILE_VARS).map(PathBuf::from),
            parameters_dir: first_set(env, &PARAMETERS_DIR_VARS).map(PathBuf::from),
            fallback_module: None,
        }
    }

    /// Set the default parameters file.
    pub fn parameters_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameters_file = Some(path.into());
        self
    }

    /// Set the parameters directory.
    pub fn parameters_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameters_dir = Some(path.into());
        self
    }

    /// Set the fallback module for unqualified test names.
    pub fn fallback_module(mut self, module: impl Into<String>) -> Self {
        self.fallback_module = Some(module.into());
        self
    }
}

fn first_set(env: &impl Env, vars: &[&str]) -> Option<String> {
    vars.iter().find_map(|var| env.non_empty(var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_env_empty() {
        assert_eq!(ParamsConfig::from_env(&env(&[])), ParamsConfig::default());
    }

    #[test]
    fn test_ntt_variables_take_precedence() {
        let config = ParamsConfig::from_env(&env(&[
            ("NTT_PARAMETERS_FILE", "ntt.parameters"),
            ("K3_PARAMETERS_FILE", "k3.parameters"),
            ("K3_PARAMETERS_DIR", "k3"),
        ]));
        assert_eq!(config.parameters_file, Some(PathBuf::from("ntt.parameters")));
        assert_eq!(config.parameters_dir, Some(PathBuf::from("k3")));
    }

    #[test]
    fn test_blank_variables_are_unset() {
        let config = ParamsConfig::from_env(&env(&[
            ("NTT_PARAMETERS_FILE", ""),
            ("K3_PARAMETERS_FILE", "k3.parameters"),
        ]));
        assert_eq!(config.parameters_file, Some(PathBuf::from("k3.parameters")));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ParamsConfig =
            serde_json::from_str(r#"{"fallback_module": "main"}"#).unwrap();
        assert_eq!(config.fallback_module.as_deref(), Some("main"));
        assert_eq!(config.parameters_file, None);
    }
}
