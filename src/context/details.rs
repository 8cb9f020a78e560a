//! Per-sprint detail records and their lookup.
//!
//! Detail records are free text authored alongside the timeline. Not every
//! sprint has one; a missing record is an expected state, represented by
//! [`DetailLookup::NotFound`] rather than an error.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Status of one epic as reported in a sprint's detail record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EpicStatus {
    pub key: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SprintMetrics {
    pub velocity: String,
    pub defects: String,
}

/// Free-text record describing what happened in a sprint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SprintDetail {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub epics: Vec<EpicStatus>,
    #[serde(default)]
    pub metrics: SprintMetrics,
}

/// Result of looking up a sprint's detail record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailLookup<'a> {
    Found(&'a SprintDetail),
    NotFound(u32),
}

/// Detail records keyed by sprint number.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SprintDetails {
    records: BTreeMap<u32, SprintDetail>,
}

impl SprintDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sprint: u32, detail: SprintDetail) {
        self.records.insert(sprint, detail);
    }

    pub fn lookup(&self, sprint: u32) -> DetailLookup<'_> {
        match self.records.get(&sprint) {
            Some(detail) => DetailLookup::Found(detail),
            None => DetailLookup::NotFound(sprint),
        }
    }

    /// Records in ascending sprint order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SprintDetail)> {
        self.records.iter().map(|(n, d)| (*n, d))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a user-supplied sprint id such as a route segment or CLI argument.
///
/// Anything that is not a positive integer yields None, which callers treat
/// the same as a sprint with no record.
pub fn parse_sprint_id(id: &str) -> Option<u32> {
    match id.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_detail(title: &str) -> SprintDetail {
        SprintDetail {
            title: title.to_string(),
            summary: String::new(),
            focus_areas: vec![],
            epics: vec![],
            metrics: SprintMetrics::default(),
        }
    }

    #[test]
    fn test_lookup_found() {
        let mut details = SprintDetails::new();
        details.insert(3, make_detail("Sprint 3"));

        match details.lookup(3) {
            DetailLookup::Found(d) => assert_eq!(d.title, "Sprint 3"),
            DetailLookup::NotFound(n) => panic!("expected record, got NotFound({n})"),
        }
    }

    #[test]
    fn test_lookup_absent_is_not_found() {
        let mut details = SprintDetails::new();
        details.insert(1, make_detail("Sprint 1"));

        assert_eq!(details.lookup(999), DetailLookup::NotFound(999));
    }

    #[test]
    fn test_iter_is_ordered() {
        let mut details = SprintDetails::new();
        details.insert(3, make_detail("c"));
        details.insert(1, make_detail("a"));
        details.insert(2, make_detail("b"));

        let order: Vec<u32> = details.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(details.len(), 3);
    }

    #[test]
    fn test_parse_sprint_id() {
        assert_eq!(parse_sprint_id("3"), Some(3));
        assert_eq!(parse_sprint_id(" 12 "), Some(12));
        assert_eq!(parse_sprint_id("0"), None);
        assert_eq!(parse_sprint_id("-1"), None);
        assert_eq!(parse_sprint_id("abc"), None);
        assert_eq!(parse_sprint_id(""), None);
    }

    #[test]
    fn test_deserialize_keyed_by_number() {
        let yaml = r#"
2:
  title: Start Backend
  focus_areas: [APIs]
  epics:
    - { key: epic-5, status: In Progress }
  metrics:
    velocity: 25 Story Points
    defects: 1 Minor Bug
"#;
        let details: SprintDetails = serde_yaml::from_str(yaml).unwrap();
        let DetailLookup::Found(detail) = details.lookup(2) else {
            panic!("sprint 2 should be present");
        };
        assert_eq!(detail.epics[0].status, "In Progress");
        assert_eq!(detail.metrics.defects, "1 Minor Bug");
    }
}
