//! Loading child baskets from environment variables.
//!
//! ```text
//! NTT_BASKET=stable:wip
//! NTT_BASKET_stable="-X @wip|@flaky"
//! ```
//!
//! `NTT_BASKET` lists the child baskets; `NTT_BASKET_<name>` holds the flags
//! of each child.

use ntt_core::{Env, Result};
use tracing::debug;

use crate::Basket;

/// What a listed child becomes when its `VAR_<name>` variable is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingBasket {
    /// Behave as `-R @<name>`
    #[default]
    TagFilter,

    /// Select every test
    Universal,
}

/// Options for [`Basket::load_from_env_with`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Policy for children without a flags variable
    pub missing: MissingBasket,
}

impl LoadOptions {
    /// Set the policy for children without a flags variable.
    pub fn missing(mut self, missing: MissingBasket) -> Self {
        self.missing = missing;
        self
    }
}

impl Basket {
    /// Append the child baskets described by `var` using default options.
    ///
    /// Returns the number of children appended.
    pub fn load_from_env(&mut self, var: &str, env: &impl Env) -> Result<usize> {
        self.load_from_env_with(var, env, &LoadOptions::default())
    }

    /// Append the child baskets described by `var`.
    ///
    /// `var` holds a colon separated list of child names; empty segments are
    /// skipped. Each child's flags are read from `{var}_{name}`. A blank
    /// flags variable yields a universal child. Children are appended after
    /// any existing ones. If `var` is not set nothing happens.
    ///
    /// On error no child is appended.
    pub fn load_from_env_with(
        &mut self,
        var: &str,
        env: &impl Env,
        options: &LoadOptions,
    ) -> Result<usize> {
        let Some(list) = env.var(var) else {
            return Ok(0);
        };

        let mut loaded = Vec::new();
        for name in list.split(':').filter(|name| !name.is_empty()) {
            let flags_var = format!("{}_{}", var, name);
            let child = match env.var(&flags_var) {
                Some(flags) => Basket::parse(name, &flags)?,
                None => match options.missing {
                    MissingBasket::TagFilter => Basket::tagged(name, &format!("@{}", name))?,
                    MissingBasket::Universal => Basket::universal(name),
                },
            };
            debug!("Loaded basket {} from {}: {}", name, flags_var, child);
            loaded.push(child);
        }

        let count = loaded.len();
        self.extend(loaded);
        Ok(count)
    }
}
