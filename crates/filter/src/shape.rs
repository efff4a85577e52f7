// SPDX-License-Identifier: MIT

//!
//! The shapes of layer filter this crate knows how to extend
//!

use serde_json::{Value, json};

/// The combinator that heads an injected filter
pub const ALL: &str = "all";

/// The `any` combinator
pub const ANY: &str = "any";

/// The position of the temporal clause within an injected `all` filter
pub const TEMPORAL_CLAUSE_INDEX: usize = 1;

/// A layer's existing filter, classified
#[derive(Debug, Clone, PartialEq)]
pub enum FilterShape {
    /// No filter at all
    Absent,

    /// `["all", ...clauses]`, holding the clauses
    All(Vec<Value>),

    /// `["any", ...clauses]`, holding the clauses
    Any(Vec<Value>),

    /// Any other expression array, e.g. `["==", "type", "river"]`, held whole
    Bare(Vec<Value>),
}

impl FilterShape {
    /// Classify a filter, or `None` if its shape isn't supported
    pub fn classify(filter: Option<&Value>) -> Option<FilterShape> {
        let items = match filter {
            None | Some(Value::Null) => return Some(FilterShape::Absent),
            Some(Value::Array(items)) => items,
            Some(_) => return None,
        };
        match items.first() {
            Some(Value::String(op)) if op == ALL => Some(FilterShape::All(items[1..].to_vec())),
            Some(Value::String(op)) if op == ANY => Some(FilterShape::Any(items[1..].to_vec())),
            Some(Value::String(_)) => Some(FilterShape::Bare(items.clone())),
            _ => None,
        }
    }

    /// Build the filter equivalent to `self AND clause`, with `clause` at
    /// [`TEMPORAL_CLAUSE_INDEX`] of a top-level `all`
    pub fn with_clause(self, clause: Value) -> Value {
        let mut filter = vec![json!(ALL), clause];
        match self {
            FilterShape::Absent => (),
            FilterShape::All(clauses) => filter.extend(clauses),
            FilterShape::Any(clauses) => {
                let mut any = vec![json!(ANY)];
                any.extend(clauses);
                filter.push(Value::Array(any));
            }
            FilterShape::Bare(expression) => filter.push(Value::Array(expression)),
        }
        Value::Array(filter)
    }
}

/// Replace the clause at [`TEMPORAL_CLAUSE_INDEX`] of an injected filter.
/// Returns `false` (leaving the filter alone) if it isn't an injected filter.
pub fn replace_temporal_clause(filter: &mut Value, clause: Value) -> bool {
    let Value::Array(items) = filter else {
        return false;
    };
    let headed_by_all = matches!(items.first(), Some(Value::String(op)) if op == ALL);
    match items.get_mut(TEMPORAL_CLAUSE_INDEX) {
        Some(slot) if headed_by_all => {
            *slot = clause;
            true
        }
        _ => false,
    }
}
