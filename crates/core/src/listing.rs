//! List query engine for array collections.
//!
//! Parses `?field=value&_sort=...&_page=...` style parameters into a
//! [`ListQuery`] and applies it to a slice of records:
//!
//! 1. Filters (`field`, `field_ne`, `field_like`, `field_gte`, `field_lte`)
//! 2. Full-text search (`q`)
//! 3. Sorting (`_sort`, `_order`)
//! 4. Slicing (`_start`, `_end`, `_limit`) or pagination (`_page`, `_limit`)
//!
//! Equality filters on the same field are OR-ed; everything else is AND-ed.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page size used when `_page` is given without `_limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
enum FilterOp {
    Eq,
    Ne,
    Like(Regex),
    Gte,
    Lte,
}

#[derive(Debug, Clone)]
struct Filter {
    path: String,
    op: FilterOp,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slice {
    All,
    Range { start: usize, end: Option<usize> },
    Page { page: usize, limit: usize },
}

/// Parsed list parameters.
#[derive(Debug, Clone)]
pub struct ListQuery {
    filters: Vec<Filter>,
    search: Option<String>,
    sort: Vec<(String, SortOrder)>,
    slice: Slice,
}

/// Page position reported back to the client in the `Link` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub limit: usize,
    pub last_page: usize,
}

/// Result of applying a [`ListQuery`].
#[derive(Debug, Clone)]
pub struct ListPage {
    pub items: Vec<Value>,
    /// Number of records matching the filters, before slicing.
    pub total: usize,
    /// Whether slicing or pagination was requested (controls `X-Total-Count`).
    pub sliced: bool,
    pub page: Option<PageInfo>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl ListQuery {
    /// A query that returns every record unchanged.
    pub fn all() -> Self {
        Self {
            filters: Vec::new(),
            search: None,
            sort: Vec::new(),
            slice: Slice::All,
        }
    }

    /// Parse raw query pairs. Unknown `_`-prefixed parameters are ignored.
    pub fn parse(params: &[(String, String)]) -> Result<Self, CoreError> {
        let mut query = Self::all();
        let mut sort_fields: Vec<String> = Vec::new();
        let mut orders: Vec<SortOrder> = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut limit = None;
        let mut page = None;

        for (key, value) in params {
            match key.as_str() {
                "q" => query.search = Some(value.to_lowercase()),
                "_sort" => sort_fields.extend(split_list(value)),
                "_order" => {
                    for order in split_list(value) {
                        orders.push(parse_order(&order)?);
                    }
                }
                "_start" => start = Some(parse_usize(key, value)?),
                "_end" => end = Some(parse_usize(key, value)?),
                "_limit" => limit = Some(parse_usize(key, value)?),
                "_page" => page = Some(parse_usize(key, value)?),
                k if k.starts_with('_') => {}
                k => query.filters.push(parse_filter(k, value)?),
            }
        }

        query.sort = sort_fields
            .into_iter()
            .enumerate()
            .map(|(i, field)| (field, orders.get(i).copied().unwrap_or(SortOrder::Asc)))
            .collect();

        query.slice = if let Some(page) = page {
            let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
            if limit == 0 {
                return Err(CoreError::Validation(
                    "_limit must be at least 1 when paginating".to_string(),
                ));
            }
            Slice::Page {
                page: page.max(1),
                limit,
            }
        } else if start.is_some() || end.is_some() {
            let start = start.unwrap_or(0);
            let end = end.or_else(|| limit.map(|l| start.saturating_add(l)));
            Slice::Range { start, end }
        } else if let Some(limit) = limit {
            Slice::Range {
                start: 0,
                end: Some(limit),
            }
        } else {
            Slice::All
        };

        Ok(query)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_order(value: &str) -> Result<SortOrder, CoreError> {
    match value.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(CoreError::Validation(format!(
            "_order must be 'asc' or 'desc', got '{other}'"
        ))),
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, CoreError> {
    value.trim().parse().map_err(|_| {
        CoreError::Validation(format!("{key} must be a non-negative integer, got '{value}'"))
    })
}

fn parse_filter(key: &str, value: &str) -> Result<Filter, CoreError> {
    let (path, op) = if let Some(path) = key.strip_suffix("_ne") {
        (path, FilterOp::Ne)
    } else if let Some(path) = key.strip_suffix("_like") {
        let regex = RegexBuilder::new(value)
            .case_insensitive(true)
            .build()
            .map_err(|e| CoreError::Validation(format!("invalid pattern for {key}: {e}")))?;
        (path, FilterOp::Like(regex))
    } else if let Some(path) = key.strip_suffix("_gte") {
        (path, FilterOp::Gte)
    } else if let Some(path) = key.strip_suffix("_lte") {
        (path, FilterOp::Lte)
    } else {
        (key, FilterOp::Eq)
    };

    Ok(Filter {
        path: path.to_string(),
        op,
        value: value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Apply `query` to `records`, returning the selected page.
pub fn apply(records: &[Value], query: &ListQuery) -> ListPage {
    let mut items: Vec<Value> = records
        .iter()
        .filter(|r| matches_filters(r, &query.filters))
        .filter(|r| match &query.search {
            Some(needle) => contains_text(r, needle),
            None => true,
        })
        .cloned()
        .collect();

    if !query.sort.is_empty() {
        items.sort_by(|a, b| compare_records(a, b, &query.sort));
    }

    let total = items.len();
    match query.slice {
        Slice::All => ListPage {
            items,
            total,
            sliced: false,
            page: None,
        },
        Slice::Range { start, end } => {
            let end = end.unwrap_or(total).min(total);
            let start = start.min(end);
            ListPage {
                items: items.drain(start..end).collect(),
                total,
                sliced: true,
                page: None,
            }
        }
        Slice::Page { page, limit } => {
            let start = (page - 1).saturating_mul(limit).min(total);
            let end = start.saturating_add(limit).min(total);
            let last_page = total.div_ceil(limit).max(1);
            ListPage {
                items: items.drain(start..end).collect(),
                total,
                sliced: true,
                page: Some(PageInfo {
                    page,
                    limit,
                    last_page,
                }),
            }
        }
    }
}

fn matches_filters(record: &Value, filters: &[Filter]) -> bool {
    let mut eq_groups: Vec<(&str, bool)> = Vec::new();

    for filter in filters {
        let actual = lookup(record, &filter.path).and_then(scalar_text);
        if let FilterOp::Eq = filter.op {
            let hit = actual.as_deref() == Some(filter.value.as_str());
            let path = filter.path.as_str();
            match eq_groups.iter_mut().find(|group| group.0 == path) {
                Some(group) => group.1 |= hit,
                None => eq_groups.push((path, hit)),
            }
            continue;
        }

        let ok = match (&filter.op, actual) {
            (FilterOp::Ne, actual) => actual.as_deref() != Some(filter.value.as_str()),
            (FilterOp::Like(regex), Some(actual)) => regex.is_match(&actual),
            (FilterOp::Gte, Some(actual)) => loose_cmp(&actual, &filter.value) != Ordering::Less,
            (FilterOp::Lte, Some(actual)) => loose_cmp(&actual, &filter.value) != Ordering::Greater,
            _ => false,
        };
        if !ok {
            return false;
        }
    }

    eq_groups.iter().all(|group| group.1)
}

/// Resolve a dotted path (`branding.colors.primary`) inside a record.
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric comparison when both sides parse as numbers, string otherwise.
fn loose_cmp(actual: &str, expected: &str) -> Ordering {
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => actual.cmp(expected),
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Null => false,
        scalar => scalar_text(scalar)
            .map(|s| s.to_lowercase().contains(needle))
            .unwrap_or(false),
    }
}

fn compare_records(a: &Value, b: &Value, sort: &[(String, SortOrder)]) -> Ordering {
    for (path, order) in sort {
        let ordering = compare_values(lookup(a, path), lookup(b, path));
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing values sort after present ones; numbers before strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Number(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Number(_))) => Ordering::Greater,
        (Some(x), Some(y)) => scalar_text(x).cmp(&scalar_text(y)),
    }
}
