//! Deterministic node key ordering.
//!
//! Keys are sorted once, before indices are assigned, so that identical
//! input always yields identical dense indices.

use std::cmp::Ordering;

use crate::types::KeyOrder;

/// Parse a key as a finite number.
pub fn numeric_value(key: &str) -> Option<f64> {
    key.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolve [`KeyOrder::Auto`] against a concrete key set.
pub fn resolve<'a, I>(order: KeyOrder, keys: I) -> KeyOrder
where
    I: IntoIterator<Item = &'a str>,
{
    match order {
        KeyOrder::Auto => {
            let mut keys = keys.into_iter().peekable();
            if keys.peek().is_some() && keys.all(|k| numeric_value(k).is_some()) {
                KeyOrder::Numeric
            } else {
                KeyOrder::Lexicographic
            }
        }
        other => other,
    }
}

/// Sort distinct keys in place under a resolved order.
///
/// Numeric order compares by value and breaks ties (`1` vs `01`) on the
/// text. Keys that fail to parse sort after every number; callers that
/// require numeric keys reject those earlier.
pub fn sort_keys(keys: &mut [String], order: KeyOrder) {
    match order {
        KeyOrder::Numeric => keys.sort_by(|a, b| compare_numeric(a, b)),
        KeyOrder::Lexicographic | KeyOrder::Auto => keys.sort_unstable(),
    }
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
