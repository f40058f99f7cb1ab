//! Editing-session change tracking over externally-owned field state.
//!
//! The hosting page owns the per-entity field state (keyed by entity label)
//! and everything around it: fetching the dataset, persisting edits,
//! selection and navigation. This crate owns what happens in between — the
//! [`EditSession`] derives an entity's baseline when the selection changes,
//! mirrors every write locally so consecutive updates never read stale
//! external state, and reports which fields genuinely differ from the
//! baseline under normalized equality.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod session;
mod traits;

pub use session::{CalendarField, EditSession};
pub use traits::{ChangeSink, StateStore};
