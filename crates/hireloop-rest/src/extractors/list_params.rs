//! List query extractor.
//!
//! Resolves `page`, `limit` and the endpoint's filter parameters into a
//! [`ListQuery`]. Bad pagination values fall back to defaults and
//! unrecognized parameters are ignored, so extraction never fails on
//! content.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use hireloop_core::{fields, FilterSet, HireloopError, ListQuery, PageLimits, PageRequest};
use std::collections::HashMap;
use std::marker::PhantomData;

/// The filter parameters a list endpoint accepts.
pub trait FilterFields: Send + Sync + 'static {
    const FIELDS: &'static [&'static str];
}

#[derive(Debug)]
pub enum UserFilters {}

impl FilterFields for UserFilters {
    const FIELDS: &'static [&'static str] = fields::USERS;
}

#[derive(Debug)]
pub enum JobFilters {}

impl FilterFields for JobFilters {
    const FIELDS: &'static [&'static str] = fields::JOBS;
}

#[derive(Debug)]
pub enum ApplicationFilters {}

impl FilterFields for ApplicationFilters {
    const FIELDS: &'static [&'static str] = fields::APPLICATIONS;
}

/// A resolved list request for the endpoint described by `F`.
#[derive(Debug)]
pub struct ListParams<F> {
    pub query: ListQuery,
    _fields: PhantomData<F>,
}

impl<F: FilterFields> ListParams<F> {
    /// Resolves raw query parameters against the given limits.
    #[must_use]
    pub fn resolve(params: &HashMap<String, String>, limits: PageLimits) -> Self {
        let page = PageRequest::resolve(
            params.get("page").map(String::as_str),
            params.get("limit").map(String::as_str),
            limits,
        );
        let filters = FilterSet::from_params(params, F::FIELDS);
        Self {
            query: ListQuery::new(page, filters),
            _fields: PhantomData,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> ListQuery {
        self.query
    }
}

#[async_trait]
impl<F, S> FromRequestParts<S> for ListParams<F>
where
    F: FilterFields,
    PageLimits: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(HireloopError::validation(format!("Invalid query string: {}", rejection.body_text()))))?;

        Ok(Self::resolve(&params, PageLimits::from_ref(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_out_of_range_pagination_is_clamped() {
        let list = ListParams::<UserFilters>::resolve(&params(&[("page", "0"), ("limit", "500")]), PageLimits::default());
        assert_eq!(list.query.page, PageRequest::new(1, 100));
    }

    #[test]
    fn test_only_recognized_filters_are_kept() {
        let list = ListParams::<JobFilters>::resolve(
            &params(&[("jobType", "CONTRACT"), ("role", "RECRUITER"), ("experienceLevel", "")]),
            PageLimits::default(),
        );
        assert_eq!(list.query.filters.canonical(), "jobType=CONTRACT");
    }

    #[test]
    fn test_configured_limits_apply() {
        let limits = PageLimits {
            default_limit: 25,
            max_limit: 50,
        };
        let list = ListParams::<ApplicationFilters>::resolve(&params(&[("limit", "abc")]), limits);
        assert_eq!(list.query.page.limit, 25);

        let list = ListParams::<ApplicationFilters>::resolve(&params(&[("limit", "75")]), limits);
        assert_eq!(list.query.page.limit, 50);
    }
}
