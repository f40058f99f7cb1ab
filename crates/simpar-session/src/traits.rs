//! Seam traits between the session and its external collaborators.

use simpar_core::FieldSet;

/// Write access to the externally-owned, keyed-by-label field state.
///
/// The hosting page owns the state for an entity's whole editing session;
/// the session only ever writes to it through this setter (the single write
/// path), passing the full merged field set on every update.
pub trait StateStore {
    /// Replace the stored field set for `label`.
    fn set_state(&mut self, label: &str, state: &FieldSet);
}

impl<F> StateStore for F
where
    F: FnMut(&str, &FieldSet),
{
    fn set_state(&mut self, label: &str, state: &FieldSet) {
        self(label, state)
    }
}

/// Receiver for change events.
///
/// Invoked at most once per observation with the entity label and the set of
/// fields whose current value differs from the baseline. The collaborator
/// behind this is typically whatever persists pending edits.
pub trait ChangeSink {
    /// A non-empty diff was observed for `label`.
    fn on_change(&mut self, label: &str, diffs: &FieldSet);
}

impl<F> ChangeSink for F
where
    F: FnMut(&str, &FieldSet),
{
    fn on_change(&mut self, label: &str, diffs: &FieldSet) {
        self(label, diffs)
    }
}
