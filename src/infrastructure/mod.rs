pub mod registry;
pub mod transport;

pub use registry::{ChannelOutcome, Completer, PendingGuard, PendingRegistry, RequestToken};
pub use transport::{HttpChannel, InFlight, ProbeRequest, RequestChannel};
