pub mod batch;
pub mod report;

pub use batch::{BatchDriver, Target};
pub use report::{ConversionJob, ConversionResult, FailedJob, RunSummary};
