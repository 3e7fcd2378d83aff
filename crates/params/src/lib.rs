//! Module parameter resolution.
//!
//! Parameters reach a test from two places, in increasing precedence:
//!
//! 1. the default parameters file (`NTT_PARAMETERS_FILE`),
//! 2. a per-test override file `{NTT_PARAMETERS_DIR}/{module}/{test}.parameters`.
//!
//! [`Suite::test_parameters`] merges both for a test id such as `test.B`.

#![warn(missing_docs)]

mod config;
mod file;
mod suite;

pub use config::{ParamsConfig, PARAMETERS_DIR_VARS, PARAMETERS_FILE_VARS};
pub use file::ParamsFile;
pub use suite::{ParameterSet, Suite};
