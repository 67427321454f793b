// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Canonical cache keys for query deduplication
//!
//! A [`QueryKey`] is a resource tag plus a canonical parameter map. Two
//! logically identical filter sets must always produce an identical key,
//! regardless of array ordering or whether a date arrived typed or as a
//! preformatted string. The whole cache hinges on this property: without it
//! identical queries double-fetch and stale data leaks across filter
//! changes.
//!
//! Canonicalization rules:
//! - dates collapse to `YYYY-MM-DD` strings (timestamps keep only the day),
//! - id lists are copied and sorted; an empty list reads as "not set",
//! - absent optional parameters are recorded as an explicit null, so
//!   "filter not set" has exactly one representation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};

/// Canonical value of one key parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Null,
    Int(i64),
    Text(String),
    /// Sorted, deduplication-friendly id list. Never empty.
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => f.write_str("null"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::List(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

/// A date parameter as callers hold it: either already typed or a string
/// from an outer layer that has not parsed it yet.
#[derive(Debug, Clone)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl DateInput {
    /// Reduce to the canonical `YYYY-MM-DD` form. Timestamp strings keep
    /// only their date part. A string that parses as neither participates
    /// verbatim: the key stays deterministic and the request itself will
    /// fail validation upstream.
    fn canonical(self) -> String {
        match self {
            DateInput::Date(date) => format_ymd(date),
            DateInput::Text(text) => {
                if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                    format_ymd(date)
                } else if let Ok(stamp) = DateTime::parse_from_rfc3339(&text) {
                    format_ymd(stamp.date_naive())
                } else {
                    text
                }
            }
        }
    }
}

fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Cache key: resource tag plus canonical parameters, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    params: BTreeMap<&'static str, ParamValue>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            params: BTreeMap::new(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Record a date parameter, normalizing its representation.
    pub fn date(self, name: &'static str, value: impl Into<DateInput>) -> Self {
        let canonical = value.into().canonical();
        self.set(name, ParamValue::Text(canonical))
    }

    /// Record an optional integer parameter (`None` reads as unset).
    pub fn int(self, name: &'static str, value: Option<i64>) -> Self {
        self.set(name, value.map_or(ParamValue::Null, ParamValue::Int))
    }

    /// Record an optional string parameter such as a pagination cursor.
    pub fn text(self, name: &'static str, value: Option<&str>) -> Self {
        self.set(
            name,
            value.map_or(ParamValue::Null, |v| ParamValue::Text(v.to_string())),
        )
    }

    /// Record an id-list parameter. The list is copied and sorted so that
    /// ordering cannot influence the key; an empty list is the same as an
    /// absent one.
    pub fn ids(self, name: &'static str, value: Option<&[String]>) -> Self {
        let canonical = match value {
            Some(ids) if !ids.is_empty() => {
                let mut sorted = ids.to_vec();
                sorted.sort();
                ParamValue::List(sorted)
            }
            _ => ParamValue::Null,
        };
        self.set(name, canonical)
    }

    fn set(mut self, name: &'static str, value: ParamValue) -> Self {
        self.params.insert(name, value);
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.resource)?;
        let mut first = true;
        for (name, value) in &self.params {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn key_is_stable_across_representations() {
        let typed = QueryKey::new("commits")
            .date("since", date(2025, 3, 1))
            .date("until", date(2025, 3, 31))
            .ids("repo_ids", Some(&["b".to_string(), "a".to_string()]));

        let stringly = QueryKey::new("commits")
            .date("since", "2025-03-01")
            .date("until", "2025-03-31T23:59:00+00:00")
            .ids("repo_ids", Some(&["a".to_string(), "b".to_string()]));

        assert_eq!(typed, stringly);
    }

    #[test]
    fn empty_list_absent_and_null_are_one_representation() {
        let absent = QueryKey::new("commits").ids("repo_ids", None);
        let empty = QueryKey::new("commits").ids("repo_ids", Some(&[]));
        assert_eq!(absent, empty);

        let unset_int = QueryKey::new("commits").int("project_id", None);
        let missing_int = QueryKey::new("commits").int("project_id", None);
        assert_eq!(unset_int, missing_int);
    }

    #[test]
    fn key_changes_when_any_parameter_changes() {
        let base = QueryKey::new("commits")
            .date("since", date(2025, 3, 1))
            .int("project_id", Some(1))
            .text("cursor", None);

        let other_date = QueryKey::new("commits")
            .date("since", date(2025, 3, 2))
            .int("project_id", Some(1))
            .text("cursor", None);
        let other_project = QueryKey::new("commits")
            .date("since", date(2025, 3, 1))
            .int("project_id", Some(2))
            .text("cursor", None);
        let with_cursor = QueryKey::new("commits")
            .date("since", date(2025, 3, 1))
            .int("project_id", Some(1))
            .text("cursor", Some("c2"));
        let other_resource = QueryKey::new("branches")
            .date("since", date(2025, 3, 1))
            .int("project_id", Some(1))
            .text("cursor", None);

        assert_ne!(base, other_date);
        assert_ne!(base, other_project);
        assert_ne!(base, with_cursor);
        assert_ne!(base, other_resource);
    }

    #[test]
    fn malformed_date_strings_participate_verbatim() {
        let a = QueryKey::new("metrics").date("since", "not-a-date");
        let b = QueryKey::new("metrics").date("since", "not-a-date");
        let c = QueryKey::new("metrics").date("since", "also-not-a-date");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_lists_parameters_in_name_order() {
        let key = QueryKey::new("commits")
            .text("cursor", Some("c2"))
            .ids("repo_ids", Some(&["r1".to_string()]))
            .int("limit", Some(2));
        assert_eq!(key.to_string(), "commits{cursor=c2,limit=2,repo_ids=[r1]}");
    }
}
