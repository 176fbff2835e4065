//! # hexwalk
//!
//! A small toolkit of independent utilities:
//!
//! - [`hex`]: a strict hexadecimal codec for byte buffers
//! - [`utils::size`]: best-effort recursive directory size measurement
//! - [`utils::append`]: order-preserving append helpers for any [`Extend`] container
//!
//! None of the pieces share state; each call stands on its own.

pub mod config;
pub mod hex;
pub mod output;
pub mod utils;

pub use config::{SizePolicy, WalkOptions};
pub use hex::{HexBytes, InvalidFormat, LetterCase, decode, encode};
pub use utils::{DirSize, WalkIssue, add_to_container, calculate_dir_size, measure_dir};
