pub mod comps;
pub mod usage;
