//! Field sets: the editable state shared with the hosting page.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical field-name constants.
///
/// These are the keys of the externally-owned state object, so they keep the
/// original wire spelling rather than Rust naming.
pub mod field {
    /// Number of agents working on an activity, as a string.
    pub const AGENTS_COUNT: &str = "agentsCount";
    /// Comma-joined indices of the agents working on an activity.
    pub const AGENTS_WORKING_ON_ACTIVITY: &str = "agentsWorkingOnActivity";
    /// JSON-serialized per-activity duration table of an agent.
    pub const ACTIVITY_DURATIONS: &str = "activityDurations";
    /// JSON-serialized activity list of an agent.
    pub const ACTIVITIES: &str = "activities";
    /// Comma-joined role names an agent belongs to.
    pub const ROLE: &str = "role";
    /// Weekly/period schedule of an agent or role.
    pub const CALENDAR: &str = "calendar";
    /// Display name of an agent's resource.
    pub const RESOURCE_NAME: &str = "resourceName";
    /// Comma-joined agent indices of a role.
    pub const AGENTS: &str = "agents";
}

/// One scheduling period of a weekly/period calendar.
///
/// Order within a calendar sequence is meaningful: the index identifies which
/// period an edit targets, so calendar sequences are never reordered by
/// normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEntry {
    /// First day of the period (e.g. `"Monday"`).
    pub from: String,
    /// Last day of the period.
    pub to: String,
    /// Start-of-work time (e.g. `"08:00"`).
    pub begin_time: String,
    /// End-of-work time.
    pub end_time: String,
}

impl CalendarEntry {
    /// The entry as a JSON value, for normalization and serialization.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "from": self.from,
            "to": self.to,
            "beginTime": self.begin_time,
            "endTime": self.end_time,
        })
    }
}

/// A single field's value: either a scalar string or a calendar sequence.
///
/// Mirrors the hosting page's loosely-typed per-field values. Serializes
/// untagged so a field set round-trips through the page's JSON state as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A plain string value, possibly a comma-separated list.
    Scalar(String),
    /// An ordered calendar sequence.
    Calendar(Vec<CalendarEntry>),
}

impl FieldValue {
    /// Shorthand for a scalar value.
    pub fn scalar(s: impl Into<String>) -> Self {
        Self::Scalar(s.into())
    }

    /// The scalar string, if this value is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Calendar(_) => None,
        }
    }

    /// The calendar sequence, if this value is one.
    pub fn as_calendar(&self) -> Option<&[CalendarEntry]> {
        match self {
            Self::Scalar(_) => None,
            Self::Calendar(entries) => Some(entries),
        }
    }

    /// The value as a JSON value, for normalization.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(s) => Value::String(s.clone()),
            Self::Calendar(entries) => {
                Value::Array(entries.iter().map(CalendarEntry::to_value).collect())
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<Vec<CalendarEntry>> for FieldValue {
    fn from(entries: Vec<CalendarEntry>) -> Self {
        Self::Calendar(entries)
    }
}

/// An insertion-ordered map from field name to value.
///
/// This is the shape of both the externally-owned per-entity state and the
/// baseline snapshot it is diffed against. Iteration order is the order
/// fields were derived/written, which is the order the hosting page renders
/// and persists them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    entries: IndexMap<String, FieldValue>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Insert or replace a field, preserving first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    /// Whether a field with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, FieldValue)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut set = FieldSet::empty();
        set.insert("b", "2");
        set.insert("a", "1");
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn reinsert_keeps_original_position() {
        let mut set = FieldSet::empty();
        set.insert("b", "2");
        set.insert("a", "1");
        set.insert("b", "3");
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(set.get("b").and_then(FieldValue::as_scalar), Some("3"));
    }

    #[test]
    fn field_value_serializes_untagged() {
        let scalar = FieldValue::scalar("7");
        assert_eq!(serde_json::to_string(&scalar).unwrap(), "\"7\"");

        let calendar = FieldValue::Calendar(vec![CalendarEntry {
            from: "Monday".into(),
            to: "Friday".into(),
            begin_time: "08:00".into(),
            end_time: "16:00".into(),
        }]);
        let json = serde_json::to_string(&calendar).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"beginTime\":\"08:00\""));
    }

    #[test]
    fn calendar_entry_deserializes_leniently() {
        let entry: CalendarEntry = serde_json::from_str(r#"{"from":"Monday"}"#).unwrap();
        assert_eq!(entry.from, "Monday");
        assert_eq!(entry.end_time, "");
    }
}
