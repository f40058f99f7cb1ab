//! Simpar: derivation and change tracking for simulation scenario editing.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! simpar sub-crates. For most users, adding `simpar` as a single dependency
//! is sufficient.
//!
//! The hosting application owns the per-entity field state, the dataset
//! fetch, and persistence; simpar owns the piece in between. When the user
//! selects an entity, the [`EditSession`](session::EditSession) derives its
//! initial fields from the dataset by category, writes them through the
//! host's store, and captures them as the baseline. Every later state change
//! is diffed against that baseline under normalized equality, so a reordered
//! comma list is not a change but an edited value is.
//!
//! # Quick start
//!
//! ```rust
//! use simpar::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! // The hosting page's keyed-by-label state, simplest possible form.
//! let states: Rc<RefCell<Vec<(String, FieldSet)>>> = Rc::default();
//! let writer = Rc::clone(&states);
//! let store = move |label: &str, state: &FieldSet| {
//!     writer.borrow_mut().push((label.to_string(), state.clone()));
//! };
//!
//! // A discovery dataset: two agents, one shared activity.
//! let dataset: Dataset = serde_json::from_value(serde_json::json!({
//!     "simulation_parameters": {
//!         "agent_activity_mapping": { "0": ["pay"], "1": ["pay"] }
//!     }
//! }))
//! .unwrap();
//!
//! let mut session = EditSession::new(store);
//! let warnings = session.select(Category::Activity, "pay", &dataset, &FieldSet::empty());
//! assert!(warnings.is_empty());
//!
//! // The derived baseline reached the store and the session.
//! let external = states.borrow().last().unwrap().1.clone();
//! assert_eq!(
//!     external.get("agentsWorkingOnActivity").and_then(FieldValue::as_scalar),
//!     Some("0, 1")
//! );
//!
//! // Reordering the list is not a change; shrinking it is.
//! let mut edited = external.clone();
//! edited.insert("agentsWorkingOnActivity", "1, 0");
//! assert!(session.observe("pay", &edited).is_empty());
//! edited.insert("agentsWorkingOnActivity", "1");
//! assert!(session.observe("pay", &edited).contains("agentsWorkingOnActivity"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `simpar-core` | Categories, field sets, dataset model, normalizer, derivation |
//! | [`session`] | `simpar-session` | `EditSession`, store and sink traits |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use simpar_core as types;
pub use simpar_session as session;

/// The most commonly used types, re-exported flat.
pub mod prelude {
    pub use simpar_core::{
        derive_initial_state, field, normalize, normalize_json, normalized_eq, CalendarEntry,
        Category, Dataset, DeriveWarning, Derived, FieldSet, FieldValue,
    };
    pub use simpar_session::{CalendarField, ChangeSink, EditSession, StateStore};
}
