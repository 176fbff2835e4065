//! Configuration types for the hexwalk utilities.
//!
//! Runtime options live in [`walk`]; persistent settings loaded from the
//! TOML config file live in [`file`].

pub mod file;
pub mod walk;

pub use file::FileConfig;
pub use walk::{SizePolicy, WalkOptions};
