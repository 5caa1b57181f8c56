//! The six resource groups of the pipeline.
//!
//! Each component declares its resources into a [`Stack`](crate::Stack) and
//! returns the addresses downstream components reference. Components never
//! look resources up by name: an upstream handle is the only way to reach
//! another component's resources.

pub mod catalog;
pub mod delivery;
pub mod event_source;
pub mod iam;
pub mod query;
pub mod storage;
