//! Floor-plan routing CLI library.
//!
//! Command handlers write to any [`std::io::Write`] so they can be exercised
//! without spawning the binary.

pub mod commands;
pub mod output;
