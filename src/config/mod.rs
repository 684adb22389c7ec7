//! JSON configuration for the command-line tools.
//!
//! - [`isolate`]: inputs, outputs and detector parameters of
//!   `isolate_fretboard`.

pub mod isolate;

pub use isolate::{load_config, OutputConfig, RunConfig};
