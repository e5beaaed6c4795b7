//! Data-driven farm layouts and bot configuration.
//!
//! This crate houses the authored content a host needs to run the agent:
//! - Farm layouts (data-driven via RON)
//! - Bot tuning (data-driven via TOML)
//!
//! Default content is embedded at compile time so the binary runs without a
//! data directory.

pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use layout::{CanSpec, FarmLayout};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, FarmLoader, LoadResult};
