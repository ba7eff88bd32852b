//! Issue report handling
//!
//! - `decoder` - XML export to [`Record`]
//! - `duration` - creation-to-resolution elapsed seconds

pub mod decoder;
pub mod duration;

pub use decoder::{decode, Record};
pub use duration::{compute_duration, normalize_timestamp};
