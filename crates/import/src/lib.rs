//! Import planning: turning user supplied paths into build units.
//!
//! An import path names a directory of TTCN-3/ASN.1 sources. Planning
//! classifies the path and yields the units the compiler should build.

#![warn(missing_docs)]

mod planner;
mod unit;

pub use planner::{is_source_file, plan_import, ImportPlanner, ImportShape, SOURCE_EXTENSIONS};
pub use unit::{BuildUnit, T3xf};
