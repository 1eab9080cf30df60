//! Core engine: configuration, path handling, resolution, invocation, execution.

pub mod engine;
pub mod error;
pub mod invocation;
pub mod library;
pub mod parser;
pub mod paths;
pub mod script;
pub mod types;
