pub mod driver;
pub mod metrics;
pub mod workload;

pub use driver::Sim;
pub use metrics::{ProcessMetrics, Summary, process_metrics, summarize};
pub use workload::BernoulliWorkload;
