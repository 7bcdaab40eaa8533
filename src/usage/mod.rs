mod event;
mod filter;
mod log;
mod usage_error;

pub use event::{NewUsageEvent, UsageEvent};
pub use filter::UsageFilter;
pub use log::UsageLog;
pub use usage_error::UsageError;
