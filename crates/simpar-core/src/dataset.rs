//! Lenient typed model of the discovery-output dataset.
//!
//! The dataset is produced by an external discovery step and arrives as a
//! large nested JSON document. Only the tables the derivation rules read are
//! modeled; everything is `#[serde(default)]` so partial or irregular
//! documents still deserialize, with missing paths surfacing later as
//! derivation warnings instead of parse failures.

use crate::state::CalendarEntry;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The full discovery dataset as consumed by this core.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    /// The simulation-parameter tables the derivation rules read.
    #[serde(default)]
    pub simulation_parameters: SimulationParameters,
}

/// The nested parameter tables keyed by agent id, resource, or role name.
///
/// Maps are insertion-ordered: JSON object order is the agent enumeration
/// order, which the activity derivation rule depends on.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimulationParameters {
    /// Agent id → list of activity labels the agent works on.
    #[serde(default)]
    pub agent_activity_mapping: IndexMap<String, Vec<String>>,
    /// Agent id → resource (display) name.
    #[serde(default)]
    pub agent_to_resource: IndexMap<String, String>,
    /// Agent id → per-activity duration table. The table shape is irregular
    /// (distribution name plus parameters), so it stays an opaque value.
    #[serde(default)]
    pub activity_durations_dict: IndexMap<String, Value>,
    /// Agent id → working calendar.
    #[serde(default)]
    pub res_calendars: IndexMap<String, ResourceCalendar>,
    /// Role name → role record.
    #[serde(default)]
    pub roles: IndexMap<String, RoleRecord>,
    /// Activity label → per-case activity cap. Only the keys are used here,
    /// as the scenario's activity listing.
    #[serde(default)]
    pub max_activity_count_per_case: IndexMap<String, Value>,
}

/// A resource calendar wrapper (`res_calendars[id].data.time_periods`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResourceCalendar {
    /// The calendar payload.
    #[serde(default)]
    pub data: CalendarData,
}

/// The payload of a resource calendar.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CalendarData {
    /// The ordered scheduling periods, if the discovery step produced any.
    ///
    /// Deserializing into [`CalendarEntry`] here unifies the agent calendar
    /// shape with the role calendar shape at the boundary, so mismatched raw
    /// shapes can never reach the differ.
    #[serde(default)]
    pub time_periods: Option<Vec<CalendarEntry>>,
}

/// A role: a named group of agents with a shared calendar.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RoleRecord {
    /// Indices of the agents belonging to this role.
    #[serde(default)]
    pub agents: Vec<i64>,
    /// The role's working calendar.
    #[serde(default)]
    pub calendar: Vec<CalendarEntry>,
}

impl Dataset {
    /// Resolve a resource display name to its agent id.
    ///
    /// Linear scan over `agent_to_resource`; the first entry whose value
    /// equals `label` wins. Duplicate resource names resolve to the first
    /// match by design. Returns `None` when no entry matches.
    pub fn resolve_agent(&self, label: &str) -> Option<&str> {
        self.simulation_parameters
            .agent_to_resource
            .iter()
            .find(|(_, name)| name.as_str() == label)
            .map(|(id, _)| id.as_str())
    }

    /// The scenario's activity labels, in dataset order.
    ///
    /// These are the keys of `max_activity_count_per_case`, which the
    /// discovery step populates for every activity it finds.
    pub fn activity_labels(&self) -> impl Iterator<Item = &str> {
        self.simulation_parameters
            .max_activity_count_per_case
            .keys()
            .map(String::as_str)
    }
}
