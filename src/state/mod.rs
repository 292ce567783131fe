//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UnitState`: Lifecycle of a single crawl unit (scheduled, fetching, extracting, expanding, done)

mod unit_state;

pub use unit_state::UnitState;
