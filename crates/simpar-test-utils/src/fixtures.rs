//! Dataset, store, and sink fixtures.

use indexmap::IndexMap;
use serde_json::{json, Value};
use simpar_core::{Dataset, FieldSet};
use simpar_session::{ChangeSink, StateStore};
use std::cell::RefCell;
use std::rc::Rc;

/// Deserialize a dataset from an inline JSON value.
///
/// Panics on malformed input; fixture JSON is always well-formed.
pub fn dataset_from_json(value: Value) -> Dataset {
    serde_json::from_value(value).expect("fixture dataset deserializes")
}

/// A small discovery-style dataset.
///
/// Three agents (`Pat`, `Sam`, `Alex`), three activities (`pay`, `ship`,
/// `audit` — `audit` has no workers), and two roles. Agent `2` (`Alex`)
/// deliberately has no resource calendar, for missing-path scenarios.
pub fn sample_dataset() -> Dataset {
    let workweek = json!([
        { "from": "Monday", "to": "Friday", "beginTime": "08:00", "endTime": "16:00" }
    ]);
    dataset_from_json(json!({
        "simulation_parameters": {
            "agent_activity_mapping": {
                "0": ["pay"],
                "1": ["pay", "ship"],
                "2": ["ship"]
            },
            "agent_to_resource": {
                "0": "Pat",
                "1": "Sam",
                "2": "Alex"
            },
            "activity_durations_dict": {
                "0": { "pay": { "distribution_name": "expon",
                                "distribution_params": [{ "value": 0.75 }] } },
                "1": { "pay": { "distribution_name": "fix",
                                "distribution_params": [{ "value": 1.5 }] },
                       "ship": { "distribution_name": "fix",
                                 "distribution_params": [{ "value": 2.0 }] } },
                "2": { "ship": { "distribution_name": "expon",
                                 "distribution_params": [{ "value": 0.25 }] } }
            },
            "res_calendars": {
                "0": { "data": { "time_periods": workweek.clone() } },
                "1": { "data": { "time_periods": workweek.clone() } }
            },
            "roles": {
                "clerk":  { "agents": [0, 1], "calendar": workweek.clone() },
                "loader": { "agents": [2],    "calendar": workweek }
            },
            "max_activity_count_per_case": { "pay": 1, "ship": 2, "audit": 1 }
        }
    }))
}

/// In-memory keyed-by-label field state, shared by clone handles.
///
/// Stands in for the hosting page's state store: the session writes through
/// one clone while the test inspects (or clears) another.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    states: Rc<RefCell<IndexMap<String, FieldSet>>>,
}

impl SharedStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored field set for `label`, if any.
    pub fn get(&self, label: &str) -> Option<FieldSet> {
        self.states.borrow().get(label).cloned()
    }

    /// Remove the stored field set for `label`, as a navigating host would.
    pub fn clear(&self, label: &str) {
        self.states.borrow_mut().shift_remove(label);
    }

    /// Number of labels with stored state.
    pub fn len(&self) -> usize {
        self.states.borrow().len()
    }

    /// Whether no label has stored state.
    pub fn is_empty(&self) -> bool {
        self.states.borrow().is_empty()
    }
}

impl StateStore for SharedStore {
    fn set_state(&mut self, label: &str, state: &FieldSet) {
        self.states
            .borrow_mut()
            .insert(label.to_string(), state.clone());
    }
}

/// A change sink that records every `(label, diffs)` emission.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<(String, FieldSet)>>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded emissions, oldest first.
    pub fn events(&self) -> Vec<(String, FieldSet)> {
        self.events.borrow().clone()
    }

    /// Number of recorded emissions.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ChangeSink for RecordingSink {
    fn on_change(&mut self, label: &str, diffs: &FieldSet) {
        self.events
            .borrow_mut()
            .push((label.to_string(), diffs.clone()));
    }
}
