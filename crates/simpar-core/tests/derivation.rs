//! Derivation rules over a realistic discovery dataset.

use serde_json::json;
use simpar_core::{
    derive_initial_state, field, normalized_eq, Category, Dataset, DeriveWarning, FieldValue,
};

fn discovery_dataset() -> Dataset {
    serde_json::from_value(json!({
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
                "1": { "pay": { "distribution_name": "fix",
                                "distribution_params": [{ "value": 1.5 }] } }
            },
            "res_calendars": {
                "1": { "data": { "time_periods": [
                    { "from": "Monday", "to": "Friday",
                      "beginTime": "08:00", "endTime": "16:00" }
                ]}}
            },
            "roles": {
                "clerk":  { "agents": [0, 1] },
                "loader": { "agents": [1, 2] }
            }
        }
    }))
    .expect("dataset deserializes")
}

fn scalar<'a>(derived: &'a simpar_core::Derived, name: &str) -> &'a str {
    derived
        .fields
        .get(name)
        .and_then(FieldValue::as_scalar)
        .unwrap_or_else(|| panic!("field '{name}' should be a scalar"))
}

#[test]
fn agent_derivation_resolves_every_table() {
    let ds = discovery_dataset();
    let derived = derive_initial_state(Category::Agent, "Sam", &ds);

    assert!(derived.warnings.is_empty(), "warnings: {:?}", derived.warnings);
    assert_eq!(scalar(&derived, field::RESOURCE_NAME), "Sam");
    assert_eq!(scalar(&derived, field::ACTIVITIES), r#"["pay","ship"]"#);
    assert_eq!(scalar(&derived, field::ROLE), "clerk, loader");
    assert!(scalar(&derived, field::ACTIVITY_DURATIONS).contains("distribution_name"));

    let calendar = derived
        .fields
        .get(field::CALENDAR)
        .and_then(FieldValue::as_calendar)
        .expect("calendar is a sequence");
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0].begin_time, "08:00");
}

#[test]
fn agent_missing_tables_warn_but_still_derive() {
    let ds = discovery_dataset();
    // Pat resolves (id "0") but has no duration table and no calendar.
    let derived = derive_initial_state(Category::Agent, "Pat", &ds);

    assert_eq!(scalar(&derived, field::RESOURCE_NAME), "Pat");
    assert_eq!(scalar(&derived, field::ACTIVITY_DURATIONS), "");
    assert_eq!(scalar(&derived, field::ACTIVITIES), r#"["pay"]"#);
    assert_eq!(scalar(&derived, field::ROLE), "clerk");
    assert!(derived.warnings.contains(&DeriveWarning::MissingDurations {
        label: "Pat".to_string()
    }));
    assert!(derived.warnings.contains(&DeriveWarning::MissingCalendar {
        label: "Pat".to_string()
    }));
}

#[test]
fn unresolved_agent_keeps_the_session_usable() {
    let ds = discovery_dataset();
    let derived = derive_initial_state(Category::Agent, "Nobody", &ds);

    assert_eq!(scalar(&derived, field::RESOURCE_NAME), "Nobody");
    assert_eq!(scalar(&derived, field::ROLE), "");
    assert_eq!(scalar(&derived, field::ACTIVITIES), "");
    assert!(derived.warnings.contains(&DeriveWarning::UnresolvedAgent {
        label: "Nobody".to_string()
    }));
}

#[test]
fn activity_derivation_matches_worker_scan() {
    let ds = discovery_dataset();
    let derived = derive_initial_state(Category::Activity, "pay", &ds);
    assert_eq!(scalar(&derived, field::AGENTS_COUNT), "2");
    assert_eq!(scalar(&derived, field::AGENTS_WORKING_ON_ACTIVITY), "0, 1");
}

#[test]
fn role_derivation_reads_the_role_record() {
    let ds = discovery_dataset();
    let derived = derive_initial_state(Category::Role, "loader", &ds);
    assert!(derived.warnings.is_empty());
    assert_eq!(scalar(&derived, field::AGENTS), "1, 2");
    assert!(derived
        .fields
        .get(field::CALENDAR)
        .and_then(FieldValue::as_calendar)
        .is_some());
}

#[test]
fn derivation_is_deterministic() {
    let ds = discovery_dataset();
    for (category, label) in [
        (Category::Activity, "pay"),
        (Category::Agent, "Sam"),
        (Category::Agent, "Nobody"),
        (Category::Role, "clerk"),
    ] {
        let first = derive_initial_state(category, label, &ds);
        let second = derive_initial_state(category, label, &ds);
        assert_eq!(first.warnings, second.warnings);
        let names: Vec<&str> = first.fields.names().collect();
        let second_names: Vec<&str> = second.fields.names().collect();
        assert_eq!(names, second_names);
        for (name, value) in first.fields.iter() {
            let other = second.fields.get(name).expect("field present in rerun");
            assert!(
                normalized_eq(value, other),
                "field '{name}' differs between identical runs"
            );
        }
    }
}
