pub mod arrivals;
pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;
pub mod timeline;

pub use arrivals::ArrivalQueue;
pub use driver::{MlfqScheduler, SimOutcome};
pub use event::SchedEvent;
pub use queue::{QueueError, QueueSet};
pub use state::{ProcessKey, ProcessRecord, ProcessTable, RunStats, Ticks};
pub(crate) use state::TimeHorizon;
pub use timeline::{Segment, SegmentOwner, Timeline, TimelineBuilder};
