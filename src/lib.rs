//! organizer-rs: navigation core for a two-axis task organizer.
//!
//! The engine keeps one consistent navigation position while the user drags
//! independently along a granularity axis (day/week/month, with nested
//! parent/child views) and a date axis, and exposes the interpolated visible
//! range and prefetch data the rendering layer needs during transitions.

pub mod core;
pub mod error;
pub mod interaction;
pub mod navigation;
pub mod repository;
pub mod telemetry;

pub use error::{OrganizerError, OrganizerResult};
pub use navigation::{NavigationConfig, NavigationState};
