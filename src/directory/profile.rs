//! Profile types and the friend-search query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CampusVaultError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        })
    }
}

impl FromStr for Gender {
    type Err = CampusVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(CampusVaultError::CommandFailed(format!(
                "unknown gender '{other}' — expected male, female, or other"
            ))),
        }
    }
}

/// Personality preference offered on the search form.  Shown back to the
/// user but not stored on profiles, so it never filters results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Friendly,
    Outgoing,
    Introverted,
    Adventurous,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Friendly,
        Personality::Outgoing,
        Personality::Introverted,
        Personality::Adventurous,
    ];
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Personality::Friendly => "Friendly",
            Personality::Outgoing => "Outgoing",
            Personality::Introverted => "Introverted",
            Personality::Adventurous => "Adventurous",
        })
    }
}

/// Public profile of a campus user.  Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub university: String,
    pub department: String,
    /// Academic session, e.g. "2021-22".
    pub session: String,
    pub gender: Gender,
    pub username: String,
}

/// Filters for `UserDirectory::search`.  `None` or blank fields match
/// every profile.
#[derive(Debug, Clone, Default)]
pub struct FriendQuery {
    pub university: Option<String>,
    pub department: Option<String>,
    pub session: Option<String>,
    pub gender: Option<Gender>,
    /// Username of the person searching; never returned.
    pub exclude_username: Option<String>,
}

impl FriendQuery {
    pub fn matches(&self, profile: &UserProfile) -> bool {
        if self
            .exclude_username
            .as_deref()
            .is_some_and(|me| me == profile.username)
        {
            return false;
        }

        field_matches(self.university.as_deref(), &profile.university)
            && field_matches(self.department.as_deref(), &profile.department)
            && field_matches(self.session.as_deref(), &profile.session)
            && self.gender.map_or(true, |g| g == profile.gender)
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(w) => w.to_lowercase() == actual.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Rina Das".into(),
            university: "Dhaka University".into(),
            department: "CSE".into(),
            session: "2021-22".into(),
            gender: Gender::Female,
            username: "rina".into(),
        }
    }

    #[test]
    fn empty_query_matches_everyone() {
        assert!(FriendQuery::default().matches(&profile()));
    }

    #[test]
    fn string_fields_ignore_case_and_whitespace() {
        let q = FriendQuery {
            university: Some("  dhaka university ".into()),
            department: Some("cse".into()),
            ..FriendQuery::default()
        };
        assert!(q.matches(&profile()));
    }

    #[test]
    fn case_folding_covers_non_ascii_letters() {
        let ecole = UserProfile {
            university: "École Polytechnique".into(),
            department: "ÉLECTRONIQUE".into(),
            ..profile()
        };
        let q = FriendQuery {
            university: Some("école polytechnique".into()),
            department: Some("électronique".into()),
            ..FriendQuery::default()
        };
        assert!(q.matches(&ecole));
    }

    #[test]
    fn blank_field_is_a_wildcard() {
        let q = FriendQuery {
            session: Some("   ".into()),
            ..FriendQuery::default()
        };
        assert!(q.matches(&profile()));
    }

    #[test]
    fn mismatching_gender_or_field_excludes() {
        let by_gender = FriendQuery {
            gender: Some(Gender::Male),
            ..FriendQuery::default()
        };
        let by_dept = FriendQuery {
            department: Some("EEE".into()),
            ..FriendQuery::default()
        };
        assert!(!by_gender.matches(&profile()));
        assert!(!by_dept.matches(&profile()));
    }

    #[test]
    fn searcher_is_excluded() {
        let q = FriendQuery {
            exclude_username: Some("rina".into()),
            ..FriendQuery::default()
        };
        assert!(!q.matches(&profile()));
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert!("robot".parse::<Gender>().is_err());
    }
}
