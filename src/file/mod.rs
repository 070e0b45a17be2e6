//! Loading YAML and JSON documents from files or stdin.

pub mod loader;
