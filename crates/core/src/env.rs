//! Environment lookup capability.
//!
//! Loaders take an [`Env`] instead of reading `std::env` directly, so callers
//! can substitute a fixed table.

use std::collections::{BTreeMap, HashMap};

/// Source of environment-style configuration values.
pub trait Env {
    /// Look up a variable. `None` if it is not set.
    fn var(&self, key: &str) -> Option<String>;

    /// Look up a variable, treating blank values as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Env for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<F> Env for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup() {
        let mut env = HashMap::new();
        env.insert("A".to_string(), "1".to_string());
        env.insert("B".to_string(), "  ".to_string());

        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B").as_deref(), Some("  "));
        assert_eq!(env.non_empty("B"), None);
        assert_eq!(env.var("C"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let env = |key: &str| (key == "X").then(|| "x".to_string());
        assert_eq!(env.var("X").as_deref(), Some("x"));
        assert_eq!(env.non_empty("Y"), None);
    }
}
