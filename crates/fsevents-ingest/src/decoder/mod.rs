//! Decoder implementations.

pub mod process;

pub use process::{expected_output_path, ProcessDecoder};
