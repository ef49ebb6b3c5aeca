//! # palisade-harness
//!
//! Developer tooling for exercising the bootstrap input resolver outside a
//! real isolated environment: a filesystem-backed trusted channel, an
//! object loader that records requests instead of mapping binaries, and a
//! serializable report of a finished bootstrap.

pub mod fsio;
pub mod report;

pub use fsio::{DirChannel, RecordingLoader};
pub use report::BootReport;
