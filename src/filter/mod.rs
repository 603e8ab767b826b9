//! Filter and search over the in-memory activity collection.
//!
//! Three pure functions the query command (and any future UI host) build on:
//!
//! - [`filter_activities`] - AND-composed clause filtering
//! - [`search_activities`] - case-insensitive substring search
//! - [`combine_filters`] - filter first, then search the filtered result
//!
//! All three preserve input order, return freshly allocated clones, never
//! mutate their input, and never fail: absent or empty criteria degrade to
//! "no constraint", and malformed content cannot reach this module (the
//! loader rejects it). Calls are independent and reentrant, so rayon
//! workers may query concurrently.


use crate::activity::Activity;

/// Conjunctive filter criteria for one query.
///
/// Values are free-form strings rather than the record-side enums: an
/// unknown category (`"nonexistent"`) matches nothing instead of being
/// rejected at parse time. `None`, empty strings, the empty festival list,
/// and `printable: false` impose no constraint, so
/// `FilterCriteria::default()` matches every record.
///
/// Category and level matching is exact and case-sensitive; the text
/// search is the deliberately forgiving counterpart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact category match (`game`, `craft`, `story`, ...).
    pub category: Option<String>,
    /// Exact difficulty level match (`beginner`, `intermediate`, `advanced`).
    pub level: Option<String>,
    /// Festival tags; a record matches when its tags contain any of these.
    pub festivals: Vec<String>,
    /// When true, only records with a printable attached.
    pub printable: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// One record against one criteria, clauses ANDed.
///
/// Clause order (category, level, festivals, printable) only affects how
/// early a non-match short-circuits, never the result.
fn matches(activity: &Activity, criteria: &FilterCriteria) -> bool {
    if let Some(category) = non_empty(&criteria.category)
        && activity.meta.category.as_str() != category
    {
        return false;
    }

    if let Some(level) = non_empty(&criteria.level)
        && activity.meta.difficulty_level.as_str() != level
    {
        return false;
    }

    // OR across the festival values, AND with the other clauses
    if !criteria.festivals.is_empty()
        && !criteria
            .festivals
            .iter()
            .any(|festival| activity.meta.tags.contains(festival))
    {
        return false;
    }

    if criteria.printable && !activity.has_printable() {
        return false;
    }

    true
}

/// Filter activities by AND-composed criteria.
///
/// Returns the matching records as fresh clones in input order. Total over
/// its inputs: a record whose tags came from `null` frontmatter simply has
/// an empty tag list and fails any festival clause.
pub fn filter_activities(records: &[Activity], criteria: &FilterCriteria) -> Vec<Activity> {
    records
        .iter()
        .filter(|activity| matches(activity, criteria))
        .cloned()
        .collect()
}

/// Search activities by title and description.
///
/// The query is trimmed and lower-cased; a blank query returns the whole
/// collection as a new vector. Matching is plain substring containment on
/// the lower-cased title or description: no tokenization, no ranking, and
/// special characters are literal.
pub fn search_activities(records: &[Activity], query: &str) -> Vec<Activity> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|activity| {
            activity.meta.title.to_lowercase().contains(&query)
                || activity.meta.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Combine filtering and search.
///
/// Criteria always narrow the candidate set before the text search; the
/// search never re-adds a record the filters excluded. With default
/// criteria and a blank query this returns all records as a new vector.
pub fn combine_filters(
    records: &[Activity],
    criteria: &FilterCriteria,
    query: &str,
) -> Vec<Activity> {
    let filtered = filter_activities(records, criteria);
    search_activities(&filtered, query)
}
