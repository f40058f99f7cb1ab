//! The editing session: baseline capture, local mirror, and diff emission.

use crate::traits::{ChangeSink, StateStore};
use simpar_core::{
    derive_initial_state, field, normalized_eq, Category, Dataset, DeriveWarning, FieldSet,
    FieldValue,
};

/// One editable sub-field of a calendar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarField {
    /// First day of the period.
    From,
    /// Last day of the period.
    To,
    /// Start-of-work time.
    BeginTime,
    /// End-of-work time.
    EndTime,
}

impl CalendarField {
    /// The wire name of the sub-field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::BeginTime => "beginTime",
            Self::EndTime => "endTime",
        }
    }
}

/// A change-tracking session for the currently selected entity.
///
/// The session reacts to two host callbacks, in order:
///
/// 1. [`select`](Self::select) — the selection changed (or the external state
///    was cleared): re-derive the entity's initial fields, push them through
///    the store, and capture them as the new baseline. The baseline is fully
///    written before `select` returns, so a subsequent diff can never observe
///    a half-built baseline.
/// 2. [`observe`](Self::observe) — the external state changed: diff it
///    against the baseline under normalized equality and report non-empty
///    diffs to the registered sink (unless read-only).
///
/// All edits go through [`set_field`](Self::set_field) /
/// [`set_calendar_entry`](Self::set_calendar_entry). These write a local
/// mirror before forwarding to the external store, so two edits in quick
/// succession never read a stale predecessor value while the store's own
/// propagation is still pending.
///
/// Everything here is synchronous and single-threaded; there is no
/// background work and no lock.
pub struct EditSession<S: StateStore> {
    store: S,
    local: FieldSet,
    baseline: FieldSet,
    tracked: Option<(Category, String)>,
    read_only: bool,
    sink: Option<Box<dyn ChangeSink>>,
}

impl<S: StateStore> EditSession<S> {
    /// Create a session writing through `store`. No entity is tracked until
    /// the first [`select`](Self::select).
    pub fn new(store: S) -> Self {
        Self {
            store,
            local: FieldSet::empty(),
            baseline: FieldSet::empty(),
            tracked: None,
            read_only: false,
            sink: None,
        }
    }

    /// The local mirror: the session's synchronously-updated copy of the
    /// external field state for the tracked entity.
    pub fn local(&self) -> &FieldSet {
        &self.local
    }

    /// The baseline snapshot diffs are computed against.
    pub fn baseline(&self) -> &FieldSet {
        &self.baseline
    }

    /// Whether change events are suppressed.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Suppress (or re-enable) change-event emission. Derivation still runs
    /// in read-only mode so read-only views populate normally.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Register the change-event sink, replacing any previous one.
    pub fn set_change_sink(&mut self, sink: impl ChangeSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Remove the change-event sink.
    pub fn clear_change_sink(&mut self) {
        self.sink = None;
    }

    /// React to a selection change or to the external state being cleared.
    ///
    /// Re-derives iff `(category, label)` differs from the tracked pair or
    /// `external` is empty (a cleared store is indistinguishable from a first
    /// load); otherwise this is a no-op, so repeated firing on unchanged
    /// inputs is safe. On re-derivation the local mirror is reset, every
    /// derived field is pushed through [`set_field`](Self::set_field) in
    /// derivation order, and the derived set becomes the new baseline —
    /// replacing the previous entity's baseline entirely.
    ///
    /// Returns the derivation warnings (also logged), which are never fatal.
    pub fn select(
        &mut self,
        category: Category,
        label: &str,
        dataset: &Dataset,
        external: &FieldSet,
    ) -> Vec<DeriveWarning> {
        let same_entity = self
            .tracked
            .as_ref()
            .is_some_and(|(c, l)| *c == category && l == label);
        if same_entity && !external.is_empty() {
            return Vec::new();
        }

        let derived = derive_initial_state(category, label, dataset);
        for warning in &derived.warnings {
            log::warn!("deriving {category} '{label}': {warning}");
        }

        self.local = FieldSet::empty();
        for (name, value) in derived.fields.iter() {
            self.set_field(label, name, value.clone());
        }
        self.baseline = derived.fields;
        self.tracked = Some((category, label.to_string()));
        log::debug!(
            "captured baseline for {category} '{label}' ({} fields)",
            self.baseline.len()
        );
        derived.warnings
    }

    /// React to an external-state change: diff `external` against the
    /// baseline and return the changed fields with their current values.
    ///
    /// If the diff is non-empty, the session is not read-only, and a sink is
    /// registered, the sink receives `(label, diffs)` exactly once for this
    /// observation.
    pub fn observe(&mut self, label: &str, external: &FieldSet) -> FieldSet {
        let diffs = self.diff(external);
        if !diffs.is_empty() && !self.read_only {
            if let Some(sink) = self.sink.as_mut() {
                sink.on_change(label, &diffs);
            }
        }
        diffs
    }

    /// Run both triggers in their guaranteed order: selection sync first
    /// (baseline fully captured), then diff observation.
    pub fn sync(
        &mut self,
        category: Category,
        label: &str,
        dataset: &Dataset,
        external: &FieldSet,
    ) -> FieldSet {
        self.select(category, label, dataset, external);
        self.observe(label, external)
    }

    /// Compute the diff of `external` against the baseline without emitting.
    ///
    /// A key present externally but absent from the baseline counts as
    /// changed.
    pub fn diff(&self, external: &FieldSet) -> FieldSet {
        let mut diffs = FieldSet::empty();
        for (name, current) in external.iter() {
            let unchanged = self
                .baseline
                .get(name)
                .is_some_and(|base| normalized_eq(current, base));
            if !unchanged {
                diffs.insert(name, current.clone());
            }
        }
        diffs
    }

    /// Set one field: merge into the local mirror, then forward the full
    /// merged set to the external store under `label`. Total; never fails.
    pub fn set_field(&mut self, label: &str, name: &str, value: impl Into<FieldValue>) {
        self.local.insert(name, value.into());
        self.store.set_state(label, &self.local);
    }

    /// Replace one sub-field of one calendar entry, routing the updated
    /// sequence through [`set_field`](Self::set_field). All other entries and
    /// sub-fields are preserved. Total: a missing calendar or out-of-range
    /// index is a logged no-op.
    pub fn set_calendar_entry(
        &mut self,
        label: &str,
        index: usize,
        sub_field: CalendarField,
        value: &str,
    ) {
        let Some(entries) = self
            .local
            .get(field::CALENDAR)
            .and_then(FieldValue::as_calendar)
        else {
            log::warn!("'{label}' has no calendar in local state; ignoring calendar edit");
            return;
        };
        if index >= entries.len() {
            log::warn!(
                "calendar index {index} out of range for '{label}' ({} entries); ignoring edit",
                entries.len()
            );
            return;
        }

        let mut updated = entries.to_vec();
        let entry = &mut updated[index];
        match sub_field {
            CalendarField::From => entry.from = value.to_string(),
            CalendarField::To => entry.to = value.to_string(),
            CalendarField::BeginTime => entry.begin_time = value.to_string(),
            CalendarField::EndTime => entry.end_time = value.to_string(),
        }
        self.set_field(label, field::CALENDAR, updated);
    }
}
