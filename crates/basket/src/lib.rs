//! Baskets: composable test filters over names and tags.
//!
//! A basket is built from `-r`/`-x` name patterns and `-R`/`-X` tag
//! expressions. Baskets nest: a test matches when the basket's own
//! predicate holds and, if the basket has children, at least one child
//! matches as well.
//!
//! ```text
//! -r PATTERN   name must match every -r pattern
//! -x PATTERN   name must match no -x pattern
//! -R TAGEXPR   tags must satisfy every -R expression
//! -X TAGEXPR   tags must satisfy no -X expression
//! ```
//!
//! Child baskets can also be loaded from environment variables, see
//! [`Basket::load_from_env`].

#![warn(missing_docs)]

mod basket;
mod env;
mod expr;

pub use basket::Basket;
pub use env::{LoadOptions, MissingBasket};
pub use expr::TagExpr;
