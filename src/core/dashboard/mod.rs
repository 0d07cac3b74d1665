//! Dashboard core: shared metric state, tiered sampling, throughput
//! estimation and the fixed-tick main loop.

mod discovery;
mod network;
mod runtime;
mod sampler;
mod schedule;
mod sink;
mod source;
mod state;

pub use discovery::{discover_primary_interface, PrimaryInterface, NO_ADDRESS};
pub use network::{megabits_per_second, NetworkCounterSnapshot, NetworkRate, NetworkRateEstimator};
pub use runtime::{Dashboard, LoopPhase, LoopStats};
pub use sampler::{tiers_due, RateSampler, Tier};
pub use schedule::{next_deadline, TickCadence};
pub use sink::DisplaySink;
pub use source::{CpuUsage, DiskUsage, MemoryUsage, MetricsSource, NetCounters};
pub use state::{DashboardSnapshot, SharedState, Slot};
