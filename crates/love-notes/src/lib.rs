//! Deterministic love score and love letter formatting.
//!
//! Both components are pure functions over their arguments; the only
//! asynchronous step is the image export collaborator in [`letter::export`].

pub mod config;
pub mod error;
pub mod letter;
pub mod score;
pub mod telemetry;
pub mod theme;
