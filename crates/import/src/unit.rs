//! Build unit abstraction.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Something the compiler can build.
///
/// Consumers only rely on the set of sources; concrete unit kinds are free
/// to carry whatever else they need.
pub trait BuildUnit: std::fmt::Debug + Send + Sync {
    /// Source files this unit compiles.
    fn sources(&self) -> BTreeSet<PathBuf>;
}

/// A set of sources compiled into one packaged `.t3xf` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct T3xf {
    name: String,
    sources: BTreeSet<PathBuf>,
}

impl T3xf {
    /// Create a unit.
    pub fn new(name: impl Into<String>, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources: sources.into_iter().collect(),
        }
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the packaged target is written to, relative to the build directory.
    pub fn output(&self) -> PathBuf {
        PathBuf::from(format!("{}.t3xf", self.name))
    }
}

impl BuildUnit for T3xf {
    fn sources(&self) -> BTreeSet<PathBuf> {
        self.sources.clone()
    }
}
