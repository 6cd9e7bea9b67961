/**
 * Role Taxonomy
 *
 * The closed set of roles a user can hold: student, company, admin.
 * Every role decision in the pipeline (signup validation, token claims,
 * route gates) goes through this enum, so an unknown role string can
 * never travel further than the boundary that first sees it.
 *
 * The wire form is always lowercase. Serde handles JSON bodies and
 * token claims, sqlx handles the TEXT column, and `parse` handles the
 * places where a role arrives as a bare string.
 */
use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role, stored on the user record and embedded in every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Default role for new signups; browses and applies to internships.
    Student,
    /// Publishes internship listings.
    Company,
    /// Platform administration, including the user listing.
    Admin,
}

impl Role {
    /// Every member of the closed role set.
    pub const ALL: [Role; 3] = [Role::Student, Role::Company, Role::Admin];

    /// Parses a lowercase role string.
    ///
    /// Returns `None` for anything outside the closed set, including
    /// case variants like `"Student"`. Callers that want to treat an
    /// unknown role as a validation failure match on the `None`.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "student" => Some(Role::Student),
            "company" => Some(Role::Company),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The canonical lowercase name, as it appears in JSON and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("company"), Some(Role::Company));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse("Student"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("administrator"), None);
    }

    #[test]
    fn test_parse_round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_serde_uses_lowercase_wire_form() {
        assert_eq!(serde_json::to_value(Role::Company).unwrap(), "company");
        let parsed: Role = serde_json::from_value(serde_json::json!("admin")).unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_display_matches_wire_form() {
        assert_eq!(Role::Student.to_string(), "student");
    }
}
