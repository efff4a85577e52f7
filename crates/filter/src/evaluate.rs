// SPDX-License-Identifier: MIT

//!
//! Evaluate (legacy syntax) layer filters against a feature's properties
//!

use crate::{FilterError, LayerId, RendererPort};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Whether a feature with the given properties passes the filter.  A missing
/// filter lets every feature through.
///
/// Supported: `all`, `any`, `none`, `has`, `!has`, `in`, `!in`, `==`, `!=`,
/// `<`, `<=`, `>`, `>=`.  Comparisons against a property the feature doesn't
/// have are false (`!=` is true).
pub fn evaluate(filter: Option<&Value>, properties: &Map<String, Value>) -> Result<bool, FilterError> {
    match filter {
        None | Some(Value::Null) => Ok(true),
        Some(filter) => evaluate_expression(filter, properties),
    }
}

/// Which of the layers, by their current filters, show a feature with the
/// given properties
pub fn layers_showing<P>(
    port: &P,
    layer_ids: &[LayerId],
    properties: &Map<String, Value>,
) -> Result<Vec<LayerId>, FilterError>
where
    P: RendererPort + ?Sized,
{
    let mut showing = Vec::new();
    for layer_id in layer_ids {
        if evaluate(port.filter(layer_id)?.as_ref(), properties)? {
            showing.push(layer_id.clone());
        }
    }
    Ok(showing)
}

fn unsupported(expression: &Value) -> FilterError {
    FilterError::UnsupportedExpression(expression.to_string())
}

/// Compare two JSON values of the same kind
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64()?.partial_cmp(&right.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

fn evaluate_expression(expression: &Value, properties: &Map<String, Value>) -> Result<bool, FilterError> {
    let Some(items) = expression.as_array() else {
        return Err(unsupported(expression));
    };
    let Some(op) = items.first().and_then(Value::as_str) else {
        return Err(unsupported(expression));
    };
    let args = &items[1..];

    // The property named by the first argument
    let key = || {
        args.first()
            .and_then(Value::as_str)
            .ok_or_else(|| unsupported(expression))
    };

    match op {
        "all" => {
            for arg in args {
                if !evaluate_expression(arg, properties)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        "any" | "none" => {
            let mut any = false;
            for arg in args {
                if evaluate_expression(arg, properties)? {
                    any = true;
                    break;
                }
            }
            Ok(if op == "any" { any } else { !any })
        }
        "has" => Ok(properties.contains_key(key()?)),
        "!has" => Ok(!properties.contains_key(key()?)),
        "in" | "!in" => {
            let found = match properties.get(key()?) {
                Some(value) => args[1..]
                    .iter()
                    .any(|candidate| compare(value, candidate) == Some(Ordering::Equal)),
                None => false,
            };
            Ok(if op == "in" { found } else { !found })
        }
        "==" | "!=" | "<" | "<=" | ">" | ">=" => {
            let [_, literal] = args else {
                return Err(unsupported(expression));
            };
            let ordering = properties
                .get(key()?)
                .and_then(|value| compare(value, literal));
            Ok(match op {
                "==" => ordering == Some(Ordering::Equal),
                "!=" => ordering != Some(Ordering::Equal),
                "<" => ordering == Some(Ordering::Less),
                "<=" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                ">" => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            })
        }
        _ => Err(unsupported(expression)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn properties() -> Map<String, Value> {
        json!({"name": "Rome", "population": 2_800_000, "capital": true})
            .as_object()
            .unwrap()
            .clone()
    }

    fn check(filter: Value) -> bool {
        evaluate(Some(&filter), &properties()).unwrap()
    }

    #[test]
    fn combinators() {
        assert!(evaluate(None, &properties()).unwrap());
        assert!(check(json!(["all"])));
        assert!(!check(json!(["any"])));
        assert!(check(json!(["none"])));
        assert!(check(json!(["all", ["has", "name"], ["has", "capital"]])));
        assert!(!check(json!(["all", ["has", "name"], ["has", "river"]])));
        assert!(check(json!(["any", ["has", "river"], ["has", "name"]])));
        assert!(check(json!(["none", ["has", "river"]])));
    }

    #[test]
    fn comparisons() {
        assert!(check(json!(["==", "name", "Rome"])));
        assert!(check(json!(["!=", "name", "Paris"])));
        assert!(check(json!(["!=", "river", "Tiber"])));
        assert!(!check(json!(["==", "river", "Tiber"])));
        assert!(check(json!([">", "population", 1_000_000])));
        assert!(check(json!([">=", "population", 2_800_000.0])));
        assert!(check(json!(["<=", "population", 2_800_000])));
        assert!(!check(json!(["<", "population", 2_800_000])));
        assert!(!check(json!(["<", "name", 5])));
        assert!(check(json!(["in", "name", "Paris", "Rome"])));
        assert!(check(json!(["!in", "name", "Paris", "London"])));
        assert!(check(json!(["!has", "river"])));
    }

    #[test]
    fn unsupported_expressions() {
        let properties = properties();
        assert!(evaluate(Some(&json!(true)), &properties).is_err());
        assert!(evaluate(Some(&json!(["get", "name"])), &properties).is_err());
        assert!(evaluate(Some(&json!(["==", "name"])), &properties).is_err());
        assert!(evaluate(Some(&json!(["has", 5])), &properties).is_err());
        assert!(evaluate(Some(&json!([])), &properties).is_err());
    }
}
