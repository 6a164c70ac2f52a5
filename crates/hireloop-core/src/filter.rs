//! Equality filters derived from list query parameters.

use crate::PageRequest;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded;

/// Query parameters each list endpoint recognizes as filters.
pub mod fields {
    /// `GET /api/users`
    pub const USERS: &[&str] = &["role"];
    /// `GET /api/jobs`
    pub const JOBS: &[&str] = &["jobType", "experienceLevel", "recruiterId"];
    /// `GET /api/applications`
    pub const APPLICATIONS: &[&str] = &["status", "jobId", "candidateId"];
}

/// Ordered set of `field = value` predicates, combined with AND.
///
/// Values are kept as the client sent them. No enum or id validation
/// happens here; a value that matches nothing yields an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter set from raw query parameters.
    ///
    /// Only `recognized` names are considered, and only when their trimmed
    /// value is non-empty.
    #[must_use]
    pub fn from_params(params: &HashMap<String, String>, recognized: &[&str]) -> Self {
        let inner = recognized
            .iter()
            .filter_map(|field| {
                let value = params.get(*field)?.trim();
                (!value.is_empty()).then(|| ((*field).to_string(), value.to_string()))
            })
            .collect();
        Self(inner)
    }

    /// Adds or replaces a predicate.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Predicates in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical text form: `all` when empty, otherwise form-urlencoded
    /// `k=v` pairs sorted by field.
    ///
    /// Separators inside names and values are percent-encoded, so distinct
    /// sets never share a form and the result never contains `:`.
    #[must_use]
    pub fn canonical(&self) -> String {
        if self.0.is_empty() {
            return "all".to_string();
        }
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// A fully resolved list request: which page, and which rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: PageRequest,
    pub filters: FilterSet,
}

impl ListQuery {
    #[must_use]
    pub const fn new(page: PageRequest, filters: FilterSet) -> Self {
        Self { page, filters }
    }
}
