//! Structured calendar-search filter evaluation.
//!
//! Answers "does this calendar object match this query" for the
//! calendar-search protocol extension. The caller fetches candidate
//! objects from storage and assembles the result list from the
//! per-object booleans returned here.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::ical::{Component, ICalendar};

/// A `{property, parameter}` pair to search parameter values of.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamSpec {
    /// Property name the parameter must belong to.
    pub property: String,
    /// Parameter name whose values are searched.
    pub parameter: String,
}

/// A structured calendar-search query.
///
/// `limit` and `offset` are carried for the pagination layer but never
/// read by [`validate`] itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSpec {
    /// Allowed component types (e.g. `VEVENT`). Any other top-level
    /// component makes the whole object ineligible.
    #[serde(default)]
    pub comps: BTreeSet<String>,
    /// Property names whose values are searched.
    #[serde(default)]
    pub props: BTreeSet<String>,
    /// Property/parameter pairs whose parameter values are searched.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// The term to look for.
    #[serde(rename = "search-term")]
    pub search_term: String,
    /// Pagination: maximum number of results.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Pagination: number of results to skip.
    #[serde(default)]
    pub offset: Option<u32>,
}

/// ## Summary
/// Evaluates a filter against one calendar object.
///
/// Every non-VTIMEZONE top-level component must be in the allowed set;
/// a single disallowed component rejects the whole object before any
/// text matching. VTIMEZONE is implicitly allowed but never scanned for
/// text. An eligible object matches once any selected property value,
/// or any selected parameter value, contains the search term.
///
/// The two `false` outcomes are deliberately distinct: a disallowed
/// component means "not eligible to be searched at all" and ends the
/// walk immediately, while "term not found" is only decided after every
/// component passed the allow-list check.
///
/// The text test is a literal, case-sensitive substring check. It does
/// NOT go through the RFC 4790 collation machinery in
/// [`crate::text_match`]: the structured search protocol fixes the
/// comparison, and only the general text-match element is
/// collation-configurable.
#[must_use]
pub fn validate(object: &ICalendar, filter: &FilterSpec) -> bool {
    let mut matched = false;

    for component in object.components() {
        // VTIMEZONE never causes rejection, and never contributes text.
        if component.is_timezone() {
            continue;
        }

        if !filter.comps.contains(&component.name) {
            return false;
        }

        if !matched {
            matched = component_matches_text(component, filter);
        }
    }

    matched
}

/// Scans one component's properties for the search term, short-circuiting
/// on the first hit.
fn component_matches_text(component: &Component, filter: &FilterSpec) -> bool {
    let term = filter.search_term.as_str();

    for property in &component.properties {
        if filter.props.contains(&property.name) && property.raw_value.contains(term) {
            return true;
        }

        for pair in &filter.params {
            if property.name != pair.property {
                continue;
            }
            if let Some(param) = property.get_param(&pair.parameter)
                && param.any_value_contains(term)
            {
                return true;
            }
        }
    }

    false
}
