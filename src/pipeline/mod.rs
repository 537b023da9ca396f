//! Pipeline orchestrator: chooses ordered conversion stages for a given
//! `(from, to)` pair and drives a buffer through them (§4.H, §4.I).

mod descriptor;
mod orchestrator;

pub use descriptor::ConversionDescriptor;
pub use orchestrator::build;
