//! Data types shared across the blame pipeline.
//!
//! - `attribution`: AttributionRecord plus the follow-up command payload

pub mod attribution;

pub use attribution::*;
