//! Entity categories and their editable field lists.

use crate::state::field;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Classification of an editable entity in a simulation scenario.
///
/// The category determines both which fields are editable for an entity and
/// which derivation rule computes the entity's initial state from the
/// discovery dataset. The set is closed: derivation dispatches by `match`,
/// so there is no "unknown category" state past the [`FromStr`] boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A simulated worker. Fields describe its durations, activities, role
    /// membership, working calendar, and resource name.
    Agent,
    /// A named group of agents with a shared calendar.
    Role,
    /// A unit of work. Fields describe which agents perform it.
    Activity,
}

impl Category {
    /// The wire/selection string for this category (`"agent"`, `"role"`,
    /// `"activity"`). Round-trips through [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Role => "role",
            Self::Activity => "activity",
        }
    }

    /// The ordered list of field names an entity of this category carries.
    ///
    /// Derivation produces exactly these keys, in exactly this order, and the
    /// core never writes a key outside this list for the category.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Agent => &[
                field::ACTIVITY_DURATIONS,
                field::ACTIVITIES,
                field::ROLE,
                field::CALENDAR,
                field::RESOURCE_NAME,
            ],
            Self::Role => &[field::CALENDAR, field::AGENTS],
            Self::Activity => &[field::AGENTS_COUNT, field::AGENTS_WORKING_ON_ACTIVITY],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agent" => Ok(Self::Agent),
            "role" => Ok(Self::Role),
            "activity" => Ok(Self::Activity),
            other => Err(CategoryParseError {
                input: other.to_string(),
            }),
        }
    }
}

/// A selection string named a category outside `{agent, role, activity}`.
///
/// This is the only place an unknown category can surface; once a
/// [`Category`] value exists, every dispatch over it is exhaustive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryParseError {
    /// The rejected input string.
    pub input: String,
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown entity category '{}' (expected agent, role, or activity)",
            self.input
        )
    }
}

impl Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips() {
        for cat in [Category::Agent, Category::Role, Category::Activity] {
            assert_eq!(cat.as_str().parse::<Category>(), Ok(cat));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "gateway".parse::<Category>().unwrap_err();
        assert_eq!(err.input, "gateway");
        assert!(err.to_string().contains("gateway"));
    }

    #[test]
    fn field_lists_are_disjoint_where_expected() {
        assert!(Category::Activity
            .field_names()
            .iter()
            .all(|f| !Category::Role.field_names().contains(f)));
    }
}
