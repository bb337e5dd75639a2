pub mod common;
mod dispatch;
pub mod export;
pub mod metrics;
pub mod query;
pub mod report;
pub mod trend;

pub use dispatch::dispatch;
