//! Per-test parameter resolution for a test suite.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use ntt_core::{Env, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ParamsConfig, ParamsFile};

/// Resolved module parameters of one test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Module the parameters were resolved for
    pub module: Option<String>,

    /// Test name without module
    pub test: Option<String>,

    /// Parameter values
    pub values: BTreeMap<String, String>,

    /// Files that contributed, lowest precedence first
    pub sources: Vec<PathBuf>,
}

impl ParameterSet {
    /// Get a value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Take the values.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }

    fn overlay(&mut self, file: ParamsFile) {
        self.values.extend(file.values);
        self.sources.push(file.path);
    }
}

/// A test suite rooted at a directory.
#[derive(Debug, Clone)]
pub struct Suite {
    root: PathBuf,
    config: ParamsConfig,
}

impl Suite {
    /// Create a suite with an empty configuration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ParamsConfig::default(),
        }
    }

    /// Create a suite configured from environment variables.
    pub fn from_env(root: impl Into<PathBuf>, env: &impl Env) -> Self {
        Self::new(root).with_config(ParamsConfig::from_env(env))
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ParamsConfig) -> Self {
        self.config = config;
        self
    }

    /// Suite root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current configuration.
    pub fn config(&self) -> &ParamsConfig {
        &self.config
    }

    /// Default parameters file, resolved against the root.
    pub fn parameters_file(&self) -> Option<PathBuf> {
        self.config.parameters_file.as_ref().map(|p| self.root.join(p))
    }

    /// Parameters directory, resolved against the root.
    pub fn parameters_dir(&self) -> PathBuf {
        match &self.config.parameters_dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }

    /// Resolve the module parameters of a test.
    ///
    /// `id` is empty, a test name (`A`) or a qualified name (`test.A`).
    /// Unqualified names use the module declared by the default file, then
    /// the configured fallback module.
    ///
    /// Override files are only looked up when module and test are plain file
    /// names, so `test.../x` never reads outside the parameters directory.
    ///
    /// Returns `None` when neither the default file applies to the test nor
    /// an override file exists. Files are read on every call. Any malformed
    /// file fails the whole resolution.
    pub fn test_parameters(&self, id: &str) -> Result<Option<ParameterSet>> {
        let defaults = match self.parameters_file() {
            Some(path) => ParamsFile::load(path)?,
            None => None,
        };

        let (module, test) = split_id(id);
        let module = module.map(str::to_string).or_else(|| {
            test.and(
                defaults
                    .as_ref()
                    .and_then(|d| d.module.clone())
                    .or_else(|| self.config.fallback_module.clone()),
            )
        });

        let overrides = match (&module, test) {
            (Some(module), Some(test)) if !is_file_name(module) || !is_file_name(test) => {
                debug!("Not looking up override file for {:?}", id);
                None
            }
            (Some(module), Some(test)) => {
                let path = self
                    .parameters_dir()
                    .join(module)
                    .join(format!("{}.parameters", test));
                ParamsFile::load(path)?
            }
            _ => None,
        };

        let defaults = defaults.filter(|d| d.applies_to(module.as_deref(), test));
        if defaults.is_none() && overrides.is_none() {
            debug!("No module parameters for {:?}", id);
            return Ok(None);
        }

        let mut set = ParameterSet {
            module,
            test: test.map(str::to_string),
            ..Default::default()
        };
        for file in defaults.into_iter().chain(overrides) {
            debug!("Module parameters for {:?} from {}", id, file.path.display());
            set.overlay(file);
        }
        Ok(Some(set))
    }
}

/// True if `part` names a single entry inside a directory.
fn is_file_name(part: &str) -> bool {
    let mut components = Path::new(part).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Split a test id on the first `.` into module and test name.
fn split_id(id: &str) -> (Option<&str>, Option<&str>) {
    fn non_empty(s: &str) -> Option<&str> {
        (!s.is_empty()).then_some(s)
    }

    match id.split_once('.') {
        Some((module, test)) => (non_empty(module), non_empty(test)),
        None => (None, non_empty(id)),
    }
}
