//! Status-page monitoring: probe, transition tracking and the background loops.

pub mod autoping;
pub mod probe;
pub mod tracker;
pub mod worker;

pub use probe::ProbeOutcome;
pub use tracker::{ObservedStatus, StatusTracker, Transition};
pub use worker::{CheckReport, Monitor};
