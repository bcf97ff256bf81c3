//! Libris application library
//!
//! Application modules and the bootstrap sequence for the Libris catalog service.

pub mod bootstrap;
pub mod modules;
pub mod utils;

pub use bootstrap::{build_registry, run};
