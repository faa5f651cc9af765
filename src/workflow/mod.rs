pub mod batch_prober;

pub use batch_prober::{BatchProber, ProbeOutcome, ProbePolicy};
