pub mod filename;
pub mod probe_bridge;

pub use probe_bridge::ProbeBridge;
