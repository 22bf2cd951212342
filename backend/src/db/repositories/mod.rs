//! Repository implementations.
//!
//! - `local`: In-memory implementation for tests, the CLI and local development

pub mod local;

pub use local::LocalRepository;
