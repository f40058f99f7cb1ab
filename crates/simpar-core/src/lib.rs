//! Core types and derivation rules for simulation scenario parameter editing.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! entity [`Category`] variants, the [`FieldSet`] state model shared with the
//! hosting page, the normalization-based equality used for change detection,
//! the lenient [`Dataset`] model of discovery output, and the per-category
//! [`derive_initial_state`] rules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod category;
mod dataset;
mod derive;
pub mod norm;
mod state;

pub use category::{Category, CategoryParseError};
pub use dataset::{CalendarData, Dataset, ResourceCalendar, RoleRecord, SimulationParameters};
pub use derive::{derive_initial_state, DeriveWarning, Derived};
pub use norm::{normalize, normalize_json, normalized_eq};
pub use state::{field, CalendarEntry, FieldSet, FieldValue};
