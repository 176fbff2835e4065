//! Utility functions and helpers.
//!
//! Directory size measurement lives in [`size`]; the container append
//! helpers live in [`append`].

pub mod append;
pub mod size;

pub use append::add_to_container;
pub use size::{DirSize, WalkIssue, calculate_dir_size, measure_dir};
