//! Per-category derivation of an entity's initial editable state.

use crate::category::Category;
use crate::dataset::Dataset;
use crate::state::{field, CalendarEntry, FieldSet, FieldValue};
use serde_json::Value;
use smallvec::SmallVec;
use std::error::Error;
use std::fmt;

/// The result of deriving an entity's initial state.
///
/// Derivation never fails hard: missing nested paths in the dataset yield
/// empty field values plus a [`DeriveWarning`], so an editing session stays
/// usable even over incomplete discovery output.
#[derive(Clone, Debug)]
pub struct Derived {
    /// The derived fields, in the category's canonical order. Always contains
    /// the category's full field list, empty-valued where data was missing.
    pub fields: FieldSet,
    /// Non-fatal problems encountered while reading the dataset.
    pub warnings: Vec<DeriveWarning>,
}

/// A required nested path was absent while deriving an entity's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeriveWarning {
    /// No `agent_to_resource` entry carries this resource name, so every
    /// identifier-dependent lookup for the agent will come up empty.
    UnresolvedAgent {
        /// The resource name that did not resolve.
        label: String,
    },
    /// The agent has no entry in the duration table.
    MissingDurations {
        /// The agent's resource name.
        label: String,
    },
    /// The agent has no entry in the activity mapping.
    MissingActivities {
        /// The agent's resource name.
        label: String,
    },
    /// The agent's resource calendar has no time periods.
    MissingCalendar {
        /// The agent's resource name.
        label: String,
    },
    /// No role record exists under this name.
    UnknownRole {
        /// The role name that was looked up.
        label: String,
    },
}

impl fmt::Display for DeriveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAgent { label } => {
                write!(f, "no agent resolves to resource name '{label}'")
            }
            Self::MissingDurations { label } => {
                write!(f, "no duration table found for resource '{label}'")
            }
            Self::MissingActivities { label } => {
                write!(f, "no activity mapping found for resource '{label}'")
            }
            Self::MissingCalendar { label } => {
                write!(f, "no calendar found for resource '{label}'")
            }
            Self::UnknownRole { label } => write!(f, "no role record found for '{label}'"),
        }
    }
}

impl Error for DeriveWarning {}

/// Derive the initial field set for `(category, label)` from the dataset.
///
/// Pure function; calling it twice with identical inputs produces identical
/// output. The fields come back in the category's canonical order (the order
/// [`Category::field_names`] lists), which is also the order the change
/// tracker writes them through to the external store.
pub fn derive_initial_state(category: Category, label: &str, dataset: &Dataset) -> Derived {
    match category {
        Category::Activity => derive_activity(label, dataset),
        Category::Agent => derive_agent(label, dataset),
        Category::Role => derive_role(label, dataset),
    }
}

/// Activity rule: collect the indices of every agent whose activity list
/// contains the label, scanning the mapping in dataset order.
fn derive_activity(label: &str, dataset: &Dataset) -> Derived {
    let params = &dataset.simulation_parameters;
    let agents: SmallVec<[usize; 8]> = params
        .agent_activity_mapping
        .values()
        .enumerate()
        .filter(|(_, activities)| activities.iter().any(|a| a == label))
        .map(|(idx, _)| idx)
        .collect();

    let mut fields = FieldSet::empty();
    fields.insert(field::AGENTS_COUNT, agents.len().to_string());
    fields.insert(field::AGENTS_WORKING_ON_ACTIVITY, join_indices(agents.iter()));

    Derived {
        fields,
        warnings: Vec::new(),
    }
}

/// Agent rule: resolve the label to an agent id, then look up the id's
/// duration table, activity list, role membership, and calendar.
fn derive_agent(label: &str, dataset: &Dataset) -> Derived {
    let params = &dataset.simulation_parameters;
    let mut warnings = Vec::new();
    let mut fields = FieldSet::empty();

    let agent_id = dataset.resolve_agent(label);
    if agent_id.is_none() {
        warnings.push(DeriveWarning::UnresolvedAgent {
            label: label.to_string(),
        });
    }

    match agent_id.and_then(|id| params.activity_durations_dict.get(id)) {
        Some(table) => fields.insert(field::ACTIVITY_DURATIONS, table.to_string()),
        None => {
            warnings.push(DeriveWarning::MissingDurations {
                label: label.to_string(),
            });
            fields.insert(field::ACTIVITY_DURATIONS, "");
        }
    }

    match agent_id.and_then(|id| params.agent_activity_mapping.get(id)) {
        Some(activities) => {
            let json = Value::Array(
                activities
                    .iter()
                    .map(|a| Value::String(a.clone()))
                    .collect(),
            );
            fields.insert(field::ACTIVITIES, json.to_string());
        }
        None => {
            warnings.push(DeriveWarning::MissingActivities {
                label: label.to_string(),
            });
            fields.insert(field::ACTIVITIES, "");
        }
    }

    let roles = match agent_id.map(str::parse::<i64>) {
        Some(Ok(id)) => params
            .roles
            .iter()
            .filter(|(_, record)| record.agents.contains(&id))
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>(),
        Some(Err(_)) => {
            log::warn!("agent id for resource '{label}' is not numeric; skipping role scan");
            Vec::new()
        }
        None => Vec::new(),
    };
    fields.insert(field::ROLE, roles.join(", "));

    match agent_id
        .and_then(|id| params.res_calendars.get(id))
        .and_then(|cal| cal.data.time_periods.clone())
    {
        Some(periods) => fields.insert(field::CALENDAR, periods),
        None => {
            warnings.push(DeriveWarning::MissingCalendar {
                label: label.to_string(),
            });
            fields.insert(field::CALENDAR, Vec::<CalendarEntry>::new());
        }
    }

    fields.insert(field::RESOURCE_NAME, label);

    Derived { fields, warnings }
}

/// Role rule: direct lookup of the role record by name.
fn derive_role(label: &str, dataset: &Dataset) -> Derived {
    let params = &dataset.simulation_parameters;
    let mut warnings = Vec::new();
    let mut fields = FieldSet::empty();

    match params.roles.get(label) {
        Some(record) => {
            fields.insert(field::CALENDAR, record.calendar.clone());
            fields.insert(field::AGENTS, join_indices(record.agents.iter()));
        }
        None => {
            warnings.push(DeriveWarning::UnknownRole {
                label: label.to_string(),
            });
            fields.insert(field::CALENDAR, Vec::<CalendarEntry>::new());
            fields.insert(field::AGENTS, "");
        }
    }

    Derived { fields, warnings }
}

fn join_indices<T: fmt::Display>(indices: impl Iterator<Item = T>) -> FieldValue {
    FieldValue::scalar(
        indices
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
