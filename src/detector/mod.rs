//! Fretboard detector: configuration and the per-frame pipeline.
//!
//! Modules
//! - [`params`] – the [`FretboardParams`] record with every threshold the
//!   stages use.
//! - `pipeline` – the [`FretboardDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::{AxisParams, BridgeParams, EnvelopeParams, FretboardParams, RotationParams};
pub use pipeline::FretboardDetector;
