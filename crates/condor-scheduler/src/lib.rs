pub mod common;
pub mod condor;
pub mod generate;
pub mod partition;
pub mod stage;

pub type Error = crate::common::error::SchedulerError;
pub type Result<T> = std::result::Result<T, Error>;
