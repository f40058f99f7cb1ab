//! Reusable fixtures for simpar test suites.
//!
//! - [`sample_dataset`] — a small discovery-style dataset with three agents,
//!   two roles, and three activities.
//! - [`SharedStore`] — an in-memory keyed-by-label store standing in for the
//!   hosting page's state.
//! - [`RecordingSink`] — a change sink that records every emission.

#![forbid(unsafe_code)]

mod fixtures;

pub use fixtures::{dataset_from_json, sample_dataset, RecordingSink, SharedStore};
