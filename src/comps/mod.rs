mod client;
mod comps_error;
mod criteria;
mod extract;
mod stats;

pub use client::ListingsClient;
pub use comps_error::CompsError;
pub use criteria::{QueryCriteria, SearchBounds};
pub use extract::Comp;
