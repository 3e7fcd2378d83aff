//! Shared building blocks for test selection and build planning.
//!
//! This crate defines the data model that the basket, parameter and import
//! crates agree on: tags, the error taxonomy and the environment lookup
//! capability.

#![warn(missing_docs)]

mod env;
mod error;
mod tag;

pub use env::{Env, ProcessEnv};
pub use error::{Error, ErrorKind, Result};
pub use tag::{Tag, TagExtractor};
