//! Data types exchanged with the list service.
//!
//! The service is loose about JSON types: identifiers may arrive as strings
//! or integers and timestamps as integers or floats. Everything is normalized
//! here so the rest of the crate only sees one shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier (user uid or list template id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    U64(u64),
    Float(f64),
    Str(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::U64(n) => Self(n.to_string()),
            // Whole floats print without a fraction: 7.0 -> "7".
            RawId::Float(n) => Self(n.to_string()),
            RawId::Str(s) => Self(s),
        }
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person using the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: Id,
    pub username: String,
}

/// Summary of a list as shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub name: String,
    pub template_id: Id,
    /// Unix timestamp, seconds.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub creation_time: i64,
}

/// A single entry of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub lists: Vec<ListSummary>,
    pub user: User,
}

/// Body of `GET /list/{template_id}/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Address of one per-user view of a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub template_id: Id,
    pub uid: Id,
}

impl ViewKey {
    pub fn new(list: &ListSummary, user: &User) -> Self {
        Self {
            template_id: list.template_id.clone(),
            uid: user.uid.clone(),
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.template_id, self.uid)
    }
}

/// Navigation payload of a list-instance activation.
///
/// Built once from a fetch result and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInstanceParams {
    pub user: User,
    pub list: ListSummary,
    pub items: Vec<Item>,
    pub other_users: Vec<User>,
}

impl ListInstanceParams {
    pub fn from_response(list: ListSummary, user: User, response: ListResponse) -> Self {
        Self {
            user,
            list,
            items: response.items,
            other_users: response.users,
        }
    }

    pub fn key(&self) -> ViewKey {
        ViewKey::new(&self.list, &self.user)
    }
}

/// Sort lists newest first. Stable: equal timestamps keep fetch order.
pub fn sort_newest_first(lists: &mut [ListSummary]) {
    lists.sort_by(|a, b| b.creation_time.cmp(&a.creation_time));
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?.trunc();
    // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "timestamp {} is out of range",
            value
        )));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, id: &str, creation_time: i64) -> ListSummary {
        ListSummary {
            name: name.to_string(),
            template_id: Id::new(id),
            creation_time,
        }
    }

    #[test]
    fn test_home_response_accepts_mixed_id_types() {
        let json = r#"{
            "lists": [
                {"name": "Groceries", "template_id": 7, "creation_time": 1500000000},
                {"name": "Packing", "template_id": "abc", "creation_time": 1500000100.75}
            ],
            "user": {"uid": 42, "username": "sam"}
        }"#;
        let response: HomeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.lists[0].template_id.as_str(), "7");
        assert_eq!(response.lists[1].template_id.as_str(), "abc");
        assert_eq!(response.lists[1].creation_time, 1_500_000_100);
        assert_eq!(response.user.uid, Id::new("42"));
    }

    #[test]
    fn test_list_response_defaults() {
        let response: ListResponse =
            serde_json::from_str(r#"{"items": [{"name": "milk"}], "extra": true}"#).unwrap();
        assert_eq!(response.items.len(), 1);
        assert!(!response.items[0].checked);
        assert!(response.users.is_empty());
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let json = r#"{"name": "x", "template_id": 1, "creation_time": "yesterday"}"#;
        assert!(serde_json::from_str::<ListSummary>(json).is_err());
    }

    #[test]
    fn test_out_of_range_timestamp_rejected() {
        for raw in ["-1e300", "1e19", "9223372036854775808"] {
            let json = format!(
                r#"{{"name": "x", "template_id": 1, "creation_time": {}}}"#,
                raw
            );
            assert!(
                serde_json::from_str::<ListSummary>(&json).is_err(),
                "{} should be rejected",
                raw
            );
        }
        let json = r#"{"name": "x", "template_id": 1, "creation_time": -1e9}"#;
        let list: ListSummary = serde_json::from_str(json).unwrap();
        assert_eq!(list.creation_time, -1_000_000_000);
    }

    #[test]
    fn test_float_and_large_ids() {
        let json = r#"{
            "lists": [
                {"name": "A", "template_id": 7.0, "creation_time": 1},
                {"name": "B", "template_id": 18446744073709551615, "creation_time": 2},
                {"name": "C", "template_id": 2.5, "creation_time": 3}
            ],
            "user": {"uid": 3.0, "username": "sam"}
        }"#;
        let response: HomeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.lists[0].template_id.as_str(), "7");
        assert_eq!(response.lists[1].template_id.as_str(), "18446744073709551615");
        assert_eq!(response.lists[2].template_id.as_str(), "2.5");
        assert_eq!(response.user.uid, Id::new("3"));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut lists = vec![summary("A", "1", 100), summary("B", "2", 200)];
        sort_newest_first(&mut lists);
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut lists = vec![
            summary("first", "1", 300),
            summary("older", "2", 100),
            summary("second", "3", 300),
            summary("third", "4", 300),
        ];
        sort_newest_first(&mut lists);
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third", "older"]);
    }

    #[test]
    fn test_view_key_distinguishes_users() {
        let list = summary("Groceries", "7", 1);
        let a = User {
            uid: Id::new("1"),
            username: "a".into(),
        };
        let b = User {
            uid: Id::new("2"),
            username: "b".into(),
        };
        assert_ne!(ViewKey::new(&list, &a), ViewKey::new(&list, &b));
        assert_eq!(ViewKey::new(&list, &a).to_string(), "7/1");
    }
}
