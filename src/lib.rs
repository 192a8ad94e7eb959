//! Lingodir - Batch File Translation
//!
//! Translates JSON, markup and plain-text files named `<name>_<lang>.<ext>`
//! into a list of target languages through an LLM completion service,
//! writing one `<name>_<target>.<ext>` file per language.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod naming;
pub mod rate_limit;
pub mod task;
pub mod translate;
