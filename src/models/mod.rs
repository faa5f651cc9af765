pub mod candidate;
pub mod image_info;
pub mod selection;

pub use candidate::{Candidate, ProbeResult};
pub use selection::{AggregateResult, Selection, SelectionLabel};
